use crate::core::prelude::*;

#[async_trait::async_trait]
pub trait Command: Send + Sync + std::fmt::Debug + 'static {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn matches(&self, command: &str) -> bool;

    /// One line per subcommand, shown by `help <command>`.
    fn usage(&self) -> &'static str {
        ""
    }

    async fn execute(&self, args: &[&str]) -> Result<String>;

    fn priority(&self) -> u8 {
        50
    }
    fn is_available(&self) -> bool {
        true
    }
}
