use crate::cli::actions::{Action, logout, open, whoami};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Open(args) => open::execute(args).await,
        Action::Whoami(args) => whoami::execute(args).await,
        Action::Logout(args) => logout::execute(args).await,
    }
}
