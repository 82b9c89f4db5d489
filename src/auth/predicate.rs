/// Answers whether the current caller holds an authenticated session.
pub trait AuthPredicate: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

impl<F> AuthPredicate for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_authenticated(&self) -> bool {
        self()
    }
}
