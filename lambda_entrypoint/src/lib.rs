#![deny(missing_docs)]
//! Initialization shared by every lambda entrypoint binary, so all of them log the same way

pub mod environment;

pub use environment::Environment;
use tracing_subscriber::EnvFilter;

/// Defines how a lambda binary is initialized
#[derive(Debug)]
pub struct LambdaEntrypoint {
    env: Environment,
}

impl Default for LambdaEntrypoint {
    fn default() -> Self {
        LambdaEntrypoint {
            env: Environment::from_env(),
        }
    }
}

/// sentinel struct which guarantees that we called [LambdaEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl LambdaEntrypoint {
    /// loads `.env`, routes panics through tracing and installs the subscriber for the environment
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_file(true)
            .with_line_number(true);

        match self.env {
            Environment::Local => builder.with_ansi(true).pretty().init(),
            // cloudwatch already timestamps each line
            Environment::Production | Environment::Develop => builder
                .with_ansi(false)
                .without_time()
                .json()
                .with_current_span(true)
                .with_span_list(false)
                .flatten_event(true)
                .init(),
        }

        tracing::trace!(environment = self.env.as_str(), "initialized tracing");

        InitializedEntrypoint(())
    }
}
