//! Allocation over the durable store; needs a Docker daemon.

use tinylink_core::{ShortCode, Shortener};
use tinylink_generator::{RandomGenerator, ScriptedGenerator, DEFAULT_CODE_LENGTH};
use tinylink_shortener::{AllocationPolicy, ShortenerError, ShortenerService};
use tinylink_storage::{PostgresConfig, PostgresRepository, Repository};
use tinylink_test_infra::postgres::{PostgresConfig as ContainerConfig, PostgresServer};

async fn start() -> (PostgresServer, PostgresRepository) {
    let postgres = PostgresServer::new(ContainerConfig::builder().build())
        .await
        .expect("start postgres");
    let url = postgres.database_url().await.expect("postgres url");

    let config = PostgresConfig::builder().database_url(url).build();
    let repo = PostgresRepository::connect(&config)
        .await
        .expect("connect postgres");
    repo.migrate().await.expect("create schema");

    (postgres, repo)
}

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

#[tokio::test]
async fn long_url_survives_shorten_and_resolve() {
    let (_postgres, repo) = start().await;
    let service = ShortenerService::new(
        repo,
        RandomGenerator::new(DEFAULT_CODE_LENGTH).unwrap(),
    );

    let path: String = (0..3_500u32)
        .map(|i| char::from(b'A' + (i.wrapping_mul(40_503) >> 7) as u8 % 26))
        .collect();
    let url = format!("https://example.com/{path}");

    let short = service.shorten(&url).await.unwrap();
    assert_eq!(service.resolve(&short).await.unwrap(), url);
}

#[tokio::test]
async fn taken_codes_are_skipped() {
    let (_postgres, repo) = start().await;
    let taken = ["aaaaaa", "bbbbbb", "cccccc"];
    for c in taken {
        repo.insert(&code(c), "https://taken.example").await.unwrap();
    }

    let generator = ScriptedGenerator::new(
        taken.map(code),
        RandomGenerator::with_seed(DEFAULT_CODE_LENGTH, 17).unwrap(),
    );
    let service = ShortenerService::new(repo, generator);

    let short = service.shorten("https://example.com/fresh").await.unwrap();
    assert!(!taken.contains(&short.as_str()));
    assert_eq!(
        service.resolve(&short).await.unwrap(),
        "https://example.com/fresh"
    );
    assert_eq!(
        service.resolve(&code("aaaaaa")).await.unwrap(),
        "https://taken.example"
    );
}

#[tokio::test]
async fn exhaustion_leaves_existing_rows_untouched() {
    let (_postgres, repo) = start().await;
    repo.insert(&code("zzzzzz"), "https://taken.example")
        .await
        .unwrap();

    let generator = ScriptedGenerator::new(
        vec![code("zzzzzz"); 3],
        RandomGenerator::with_seed(DEFAULT_CODE_LENGTH, 17).unwrap(),
    );
    let policy = AllocationPolicy::builder().max_attempts(3).build();
    let service = ShortenerService::with_policy(repo, generator, policy);

    let err = service.shorten("https://example.com").await.unwrap_err();
    assert_eq!(err, ShortenerError::AllocationExhausted { attempts: 3 });
    assert_eq!(
        service.resolve(&code("zzzzzz")).await.unwrap(),
        "https://taken.example"
    );
}
