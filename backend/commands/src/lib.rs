pub mod bot;
pub mod detection;
pub mod dispatch;
pub mod handlers;
pub mod intent;
pub mod registry;
pub mod request;
pub mod types;

use std::sync::Arc;

use deploybot_config::DeployBotConfig;
use deploybot_github::DeploymentApi;

pub use bot::Bot;
pub use detection::detect_command;
pub use dispatch::{CommandContext, CommandDispatcher, CommandHandler, CommandResponse};
pub use handlers::{DeployHandler, HelpHandler, WhereCanIDeployHandler};
pub use intent::{CommandKind, DeployIntent, Target};
pub use registry::{builtin_commands, CommandRegistry};
pub use request::{DeployError, DeployRequest};
pub use types::{CommandDef, CommandInvocation, HelpEntry};

/// Build a dispatcher pre-wired with all built-in handlers.
pub fn build_dispatcher(config: Arc<DeployBotConfig>, api: Arc<dyn DeploymentApi>) -> CommandDispatcher {
    let mut dispatcher = CommandDispatcher::new();

    let deploy = Arc::new(DeployHandler {
        config: config.clone(),
        api: api.clone(),
    });
    dispatcher.register("deploy", deploy.clone());
    dispatcher.register("lock", deploy);
    dispatcher.register("wcid", Arc::new(WhereCanIDeployHandler { config, api }));
    dispatcher.register("help", Arc::new(HelpHandler { registry: CommandRegistry::new() }));

    dispatcher
}
