use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use liftlog_model::Identity;
use std::sync::Arc;

use crate::app::{App, ConsoleNotificationSink};
use crate::common::validation::ValidationResult;
use crate::domains::auth::flows::AccountOutcome;
use crate::domains::auth::forms::{SignInForm, SignUpForm};
use crate::domains::auth::security::SecureCredential;
use crate::domains::profile::form::ProfileFormState;
use crate::domains::profile::state_types::UpdateOutcome;
use crate::infra::assets::FsAssetSource;
use crate::infra::config::{Config, SERVER_URL_ENV};

#[derive(Parser, Debug)]
#[command(name = "liftlog")]
#[command(about = "Manage your Liftlog account, profile and exercise history")]
pub struct Cli {
    /// Server base URL (overrides the config file)
    #[arg(long, global = true, env = SERVER_URL_ENV)]
    pub server_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check credentials against the server
    SignIn(Credentials),
    /// Create an account and sign in
    SignUp {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        credentials: Credentials,
        /// Password confirmation; defaults to the password
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Change the display name and optionally the password
    Profile {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, requires = "new_password")]
        old_password: Option<String>,
        #[arg(long)]
        new_password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Replace the profile photo with the image at PATH
    Avatar {
        #[command(flatten)]
        credentials: Credentials,
        /// Image file; omitting it leaves the photo unchanged
        path: Option<String>,
    },
    /// List the recorded exercises by day
    History(Credentials),
}

#[derive(Args, Debug, Clone)]
pub struct Credentials {
    #[arg(long, env = "LIFTLOG_EMAIL")]
    pub email: String,
    #[arg(long, env = "LIFTLOG_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl Credentials {
    fn form(&self) -> SignInForm {
        SignInForm::new(self.email.clone(), self.password.as_str())
    }
}

impl Cli {
    pub fn config(&self) -> Config {
        let mut config = Config::load();
        if let Some(url) = &self.server_url {
            config.server_url = url.clone();
        }
        config
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let app = App::new(cli.config(), Arc::new(ConsoleNotificationSink))
        .context("failed to set up the API client")?;

    match cli.command {
        Command::SignIn(credentials) => {
            let identity = sign_in(&app, &credentials).await?;
            println!("Signed in as {} <{}>", identity.name, identity.email);
        }
        Command::SignUp {
            name,
            credentials,
            confirm,
        } => {
            let form = SignUpForm {
                name,
                email: credentials.email.clone(),
                password: SecureCredential::from(credentials.password.as_str()),
                password_confirm: SecureCredential::from(
                    confirm.as_deref().unwrap_or(credentials.password.as_str()),
                ),
            };
            let identity =
                account_result(app.account_flows().sign_up(&form).await)?;
            println!("Welcome, {}!", identity.name);
        }
        Command::Profile {
            credentials,
            name,
            old_password,
            new_password,
            confirm_password,
        } => {
            let identity = sign_in(&app, &credentials).await?;
            let mut form = ProfileFormState::for_identity(&identity);
            if let Some(name) = name {
                form = form.with_name(name);
            }
            if let Some(new_password) = new_password {
                let confirm = confirm_password
                    .unwrap_or_else(|| new_password.clone());
                form = form.with_password_rotation(
                    old_password.unwrap_or_default(),
                    new_password,
                    confirm,
                );
            }

            let updater =
                app.profile_updater(Arc::new(FsAssetSource::default()));
            update_result(updater.submit_profile(&form).await)?;
        }
        Command::Avatar { credentials, path } => {
            sign_in(&app, &credentials).await?;
            let updater =
                app.profile_updater(Arc::new(FsAssetSource::new(path)));
            match updater.replace_avatar().await {
                UpdateOutcome::Cancelled => println!("Profile photo unchanged"),
                outcome => {
                    update_result(outcome)?;
                    if let Some(url) = app.avatar_url().await {
                        println!("{url}");
                    }
                }
            }
        }
        Command::History(credentials) => {
            sign_in(&app, &credentials).await?;
            let view = app.history_loader().load().await;
            if let Some(message) = view.empty_message() {
                println!("{message}");
            }
            for section in view.sections.iter().filter(|s| !s.is_empty()) {
                println!("{}", section.title);
                for entry in &section.data {
                    println!(
                        "  {}  {} ({})",
                        entry.hour, entry.name, entry.group
                    );
                }
            }
        }
    }

    app.sign_out().await;
    Ok(())
}

async fn sign_in(
    app: &App,
    credentials: &Credentials,
) -> anyhow::Result<Identity> {
    account_result(app.account_flows().sign_in(&credentials.form()).await)
}

fn account_result(outcome: AccountOutcome) -> anyhow::Result<Identity> {
    match outcome {
        AccountOutcome::SignedIn(identity) => Ok(identity),
        AccountOutcome::Invalid(result) => {
            print_field_errors(&result);
            bail!("the form has invalid fields")
        }
        AccountOutcome::Busy => bail!("another request is still running"),
        AccountOutcome::Failed(err) => {
            Err(err).context("account request failed")
        }
    }
}

fn update_result(outcome: UpdateOutcome) -> anyhow::Result<()> {
    match outcome {
        UpdateOutcome::Updated(_) | UpdateOutcome::Cancelled => Ok(()),
        UpdateOutcome::Invalid(result) => {
            print_field_errors(&result);
            bail!("the form has invalid fields")
        }
        UpdateOutcome::Busy => bail!("another update is still running"),
        UpdateOutcome::Failed(err) => Err(err).context("profile update failed"),
    }
}

fn print_field_errors(result: &ValidationResult) {
    for (field, message) in result.iter() {
        eprintln!("{field}: {message}");
    }
}
