pub mod server;

use anyhow::Result;

#[derive(Debug)]
pub enum Action {
    Server(server::Args),
}

impl Action {
    /// Run the action to completion.
    ///
    /// # Errors
    /// Returns whatever error the action fails with.
    pub async fn execute(self) -> Result<()> {
        match self {
            Self::Server(args) => server::execute(args).await,
        }
    }
}
