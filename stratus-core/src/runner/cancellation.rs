use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Debug, Clone)]
pub struct Handle(Arc<AtomicBool>);

impl Handle {
    pub fn cancel(&self) {
        tracing::debug!("cancellation requested");
        self.0.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct Token(Arc<AtomicBool>);

impl Token {
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub fn new() -> (Handle, Token) {
    let flag = Arc::new(AtomicBool::new(false));
    (Handle(flag.clone()), Token(flag))
}
