#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("metrics registration: {0}")]
    Metrics(#[from] prometheus::Error),
}
