//! Account commands - register, login, logout, whoami.

use anyhow::{Result, bail};
use catadex_core::UserProfile;
use catadex_store::NewUser;
use clap::Args;
use tracing::info;

use crate::context::AppContext;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Username used to sign in.
    #[arg(long, short)]
    pub username: String,

    /// Password.
    #[arg(long, short)]
    pub password: String,

    /// Full name.
    #[arg(long, short)]
    pub name: String,

    /// Email address.
    #[arg(long, short)]
    pub email: String,

    /// Phone number.
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Document number.
    #[arg(long, default_value = "")]
    pub document: String,

    /// Course or affiliation.
    #[arg(long, default_value = "")]
    pub course: String,
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Username.
    #[arg(long, short)]
    pub username: String,

    /// Password.
    #[arg(long, short)]
    pub password: String,
}

/// Creates an account.
pub async fn register(args: &RegisterArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    ctx.auth
        .register(NewUser {
            username: args.username.clone(),
            password: args.password.clone(),
            profile: UserProfile {
                name: args.name.trim().to_string(),
                phone: args.phone.clone(),
                document: args.document.clone(),
                email: args.email.trim().to_string(),
                course: args.course.clone(),
            },
        })
        .await?;

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("Account created. Sign in with `catadex login`.");
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({"registered": args.username.trim()});
            println!("{}", JsonFormatter::new(cli.pretty).format(&output)?);
        }
    }
    Ok(())
}

/// Signs in.
pub async fn login(args: &LoginArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    let Some(session) = ctx.auth.sign_in(&args.username, &args.password).await? else {
        bail!("invalid username or password");
    };
    info!(username = %session.username, "Signed in");

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("Welcome, {}!", session.profile.first_name());
            }
        }
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&session)?),
    }
    Ok(())
}

/// Signs out.
pub async fn logout(cli: &Cli, ctx: &AppContext) -> Result<()> {
    ctx.auth.sign_out().await?;
    if cli.format == OutputFormat::Text && !cli.quiet {
        println!("Signed out.");
    }
    Ok(())
}

/// Shows the active session.
pub async fn whoami(cli: &Cli, ctx: &AppContext) -> Result<()> {
    let session = ctx.require_session().await?;

    match cli.format {
        OutputFormat::Text => println!("{}", TextFormatter::new(!cli.no_color).format_session(&session)),
        OutputFormat::Json => println!("{}", JsonFormatter::new(cli.pretty).format(&session)?),
    }
    Ok(())
}
