use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Once};

use directories::ProjectDirs;
use drive_admin::api::{HttpGateway, RequestScope};
use drive_admin::config::{ApiConfig, AppConfig};
use drive_admin::error::AppError;
use drive_admin::session::{Session, SessionStore};
use drive_admin::telemetry;
use tracing::{debug, warn};

const SESSION_FILE_NAME: &str = "session.json";
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Everything a command needs: configuration, the stored session and a scope
/// that Ctrl-C cancels once the command starts talking to the backend.
pub(crate) struct Console {
    pub(crate) config: AppConfig,
    pub(crate) store: SessionStore,
    pub(crate) session: Option<Session>,
    pub(crate) scope: RequestScope,
    interrupts: Once,
}

impl Console {
    pub(crate) fn load(base_url: Option<String>) -> Result<Self, AppError> {
        let mut config = AppConfig::load()?;
        if let Some(base_url) = base_url {
            config.api.base_url = ApiConfig::parse_base_url(&base_url)?;
        }

        telemetry::init(&config.telemetry)?;

        let store = SessionStore::new(session_path(&config));
        let session = store.load()?;
        debug!(
            environment = ?config.environment,
            base_url = %config.api.base_url,
            signed_in = session.is_some(),
            "console ready"
        );

        Ok(Self {
            config,
            store,
            session,
            scope: RequestScope::new(),
            interrupts: Once::new(),
        })
    }

    /// Build the gateway and start routing Ctrl-C into the request scope.
    /// Prompts run before this, so an interrupt there still ends the process.
    pub(crate) fn gateway(&self) -> Result<Arc<HttpGateway>, AppError> {
        self.interrupts
            .call_once(|| watch_interrupts(self.scope.clone()));
        Ok(Arc::new(HttpGateway::new(
            &self.config.api,
            self.session.clone(),
        )?))
    }
}

fn session_path(config: &AppConfig) -> PathBuf {
    if let Some(path) = &config.storage.session_file {
        return path.clone();
    }
    ProjectDirs::from("et", "DrivingSchool", "drive-admin")
        .map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".drive-admin-{SESSION_FILE_NAME}")))
}

/// The first Ctrl-C cancels the scope so an in-flight request resolves as
/// cancelled; a second one exits.
fn watch_interrupts(scope: RequestScope) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        warn!("interrupted; cancelling the request in flight");
        scope.cancel();
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted again; exiting");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    });
}

pub(crate) fn prompt_password(prompt: &str) -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|err| AppError::Io(io::Error::new(io::ErrorKind::Other, err.to_string())))
}

pub(crate) fn password_or_prompt(password: Option<String>) -> Result<String, AppError> {
    match password {
        Some(password) => Ok(password),
        None => prompt_password("Password"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drive_admin::config::{AppEnvironment, StorageConfig, TelemetryConfig};

    fn console() -> Console {
        let base_url = ApiConfig::parse_base_url("http://localhost:8080").expect("valid url");
        Console {
            config: AppConfig {
                environment: AppEnvironment::Test,
                api: ApiConfig::new(base_url),
                telemetry: TelemetryConfig {
                    log_level: "warn".to_string(),
                },
                storage: StorageConfig {
                    session_file: Some(PathBuf::from("unused-session.json")),
                    download_dir: PathBuf::from("."),
                },
            },
            store: SessionStore::new("unused-session.json"),
            session: None,
            scope: RequestScope::new(),
            interrupts: Once::new(),
        }
    }

    #[tokio::test]
    async fn interrupts_are_watched_only_once_a_gateway_exists() {
        let console = console();
        assert!(!console.interrupts.is_completed());

        console.gateway().expect("gateway builds");
        assert!(console.interrupts.is_completed());

        console.gateway().expect("second gateway builds");
        assert!(!console.scope.is_cancelled());
    }

    #[test]
    fn configured_session_file_wins() {
        let console = console();
        assert_eq!(
            session_path(&console.config),
            PathBuf::from("unused-session.json")
        );
    }
}
