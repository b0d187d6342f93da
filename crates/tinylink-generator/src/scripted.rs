use crate::Generator;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tinylink_core::ShortCode;

/// Replays a fixed list of codes, then falls back to an inner generator.
///
/// Useful for driving the allocation retry path deterministically: script
/// codes that are already taken and the caller has to move past them.
#[derive(Debug)]
pub struct ScriptedGenerator<G> {
    script: Mutex<VecDeque<ShortCode>>,
    fallback: G,
}

impl<G: Generator> ScriptedGenerator<G> {
    pub fn new<I, C>(script: I, fallback: G) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ShortCode>,
    {
        Self {
            script: Mutex::new(script.into_iter().map(Into::into).collect()),
            fallback,
        }
    }

    /// Number of scripted codes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl<G: Generator> Generator for ScriptedGenerator<G> {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let next = self.script.lock().pop_front();
        match next {
            Some(code) => code,
            None => self.fallback.generate().into(),
        }
    }
}
