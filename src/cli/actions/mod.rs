pub mod console;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Console { api_url: String, timeout: u64 },
}
