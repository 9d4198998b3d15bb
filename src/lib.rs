pub use self::{
    settings::Settings,
    status_fetcher::{get_status, RedirectPolicy, StatusFetcher, TransportError},
};

pub mod check;
pub mod settings;
pub mod status_fetcher;
pub mod trace;
