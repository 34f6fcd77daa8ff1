//! Account commands over the mock auth layer.

use clap::Subcommand;
use studypro_core::{AuthSession, ProfileUpdate, SignupData};

use crate::common::{open_kv, print_json, CliResult};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in (demo account: demo@example.com / password)
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Register a new account
    Signup {
        /// Display name
        name: String,
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Log out and clear the stored session
    Logout,
    /// Print the current user
    Whoami,
    /// Update the current user's profile
    Update {
        /// New display name
        #[arg(long)]
        name: Option<String>,
        /// New email
        #[arg(long)]
        email: Option<String>,
        /// New avatar URL
        #[arg(long)]
        avatar: Option<String>,
    },
}

pub fn run(action: AuthAction) -> CliResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let mut session = AuthSession::load(open_kv()?)?;

    match action {
        AuthAction::Login { email, password } => {
            let profile = runtime.block_on(session.login(&email, &password))?;
            println!("Logged in as {}", profile.name);
            print_json(profile)?;
        }
        AuthAction::Signup {
            name,
            email,
            password,
        } => {
            let profile = runtime.block_on(session.signup(SignupData {
                name,
                email,
                password,
            }))?;
            println!("Account created: {}", profile.email);
            print_json(&profile)?;
        }
        AuthAction::Logout => {
            session.logout()?;
            println!("Logged out");
        }
        AuthAction::Whoami => match session.current_user() {
            Some(profile) => print_json(profile)?,
            None => println!("Not logged in"),
        },
        AuthAction::Update {
            name,
            email,
            avatar,
        } => {
            let profile = runtime.block_on(session.update_profile(ProfileUpdate {
                name,
                email,
                avatar,
            }))?;
            println!("Profile updated:");
            print_json(profile)?;
        }
    }
    Ok(())
}
