use crate::commands::command::Command;
use crate::commands::parsing::arg;
use crate::context::AdminContext;
use crate::core::prelude::*;
use crate::i18n::get_command_translation;
use std::sync::Arc;

#[derive(Debug)]
pub struct LoginCommand {
    ctx: Arc<AdminContext>,
}

impl LoginCommand {
    pub fn new(ctx: Arc<AdminContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Command for LoginCommand {
    fn name(&self) -> &'static str {
        "login"
    }

    fn description(&self) -> &'static str {
        "Sign in to the content store"
    }

    fn usage(&self) -> &'static str {
        "login <email> <password>"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "login" | "signin")
    }

    async fn execute(&self, args: &[&str]) -> Result<String> {
        let email = arg(args, 0, self.usage())?;
        let password = arg(args, 1, self.usage())?;

        match self.ctx.client().login(email, password).await {
            Ok(user) => Ok(get_command_translation(
                "auth.login.success",
                &[user.display_name()],
            )),
            Err(e) => Err(AppError::Auth(crate::t!("auth.login.failed", &e.reason()))),
        }
    }

    fn priority(&self) -> u8 {
        90
    }
}

#[derive(Debug)]
pub struct LogoutCommand {
    ctx: Arc<AdminContext>,
}

impl LogoutCommand {
    pub fn new(ctx: Arc<AdminContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Command for LogoutCommand {
    fn name(&self) -> &'static str {
        "logout"
    }

    fn description(&self) -> &'static str {
        "Forget the stored session token"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "logout" | "signout")
    }

    async fn execute(&self, _args: &[&str]) -> Result<String> {
        self.ctx.client().logout();
        Ok(get_command_translation("auth.logout", &[]))
    }

    fn priority(&self) -> u8 {
        90
    }
}

#[derive(Debug)]
pub struct WhoamiCommand {
    ctx: Arc<AdminContext>,
}

impl WhoamiCommand {
    pub fn new(ctx: Arc<AdminContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    fn description(&self) -> &'static str {
        "Show the signed-in account"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "whoami" | "me")
    }

    async fn execute(&self, _args: &[&str]) -> Result<String> {
        match self.ctx.session().user() {
            Some(user) => Ok(get_command_translation(
                "auth.whoami",
                &[user.display_name(), &user.email, &user.role],
            )),
            None => Ok(get_command_translation("auth.anonymous", &[])),
        }
    }

    fn priority(&self) -> u8 {
        85
    }
}
