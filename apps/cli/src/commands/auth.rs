use clap::Subcommand;
use tracing::info;

use super::{or_dash, Ctx};

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        email: String,
        /// Read from TUNI_PASSWORD when omitted
        #[arg(long, env = "TUNI_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
    },
    /// Sign in and store the tokens
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "TUNI_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the stored tokens
    Logout,
    /// Show the signed-in user
    Me,
    /// Confirm an email address with the token from the verification mail
    VerifyEmail { token: String },
    /// Send a password reset link
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the token from the reset mail
    ResetPassword {
        token: String,
        #[arg(long, env = "TUNI_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
    /// Two-factor authentication
    #[command(subcommand, name = "2fa")]
    TwoFactor(TwoFactorCommand),
}

#[derive(Subcommand)]
pub enum TwoFactorCommand {
    /// Generate a secret and backup codes
    Enable,
    /// Confirm the authenticator app with a 6-digit code
    Verify { code: String },
    /// Turn two-factor authentication off
    Disable { code: String },
}

pub async fn run(ctx: &Ctx, command: AuthCommand) -> anyhow::Result<()> {
    let client = &ctx.client;
    match command {
        AuthCommand::Signup {
            email,
            password,
            full_name,
        } => {
            let tokens = ctx
                .call(client.signup(&email, &password, full_name.as_deref()))
                .await?;
            info!("Signed up as {}", email.trim());
            match tokens.user {
                Some(user) => println!("Welcome, {}!", user.display_name()),
                None => println!("Account created. Check your inbox to verify your email."),
            }
        }
        AuthCommand::Login { email, password } => {
            let tokens = ctx.call(client.login(&email, &password)).await?;
            let name = tokens
                .user
                .as_ref()
                .map(|u| u.display_name().to_string())
                .unwrap_or_else(|| email.trim().to_string());
            println!("Signed in as {}", name);
        }
        AuthCommand::Logout => {
            client.logout().await?;
            println!("Signed out");
        }
        AuthCommand::Me => {
            let user = ctx.call(client.me()).await?;
            ctx.emit(&user, |u| {
                println!("{} <{}>", u.display_name(), u.email);
                println!("  id:          {}", u.id);
                println!("  verified:    {}", u.is_verified.unwrap_or(false));
                println!("  kyc:         {}", or_dash(u.kyc_status.as_deref()));
                println!("  2fa:         {}", u.two_factor_enabled.unwrap_or(false));
                if u.is_admin.unwrap_or(false) {
                    println!("  role:        admin");
                }
            })?;
        }
        AuthCommand::VerifyEmail { token } => {
            let reply = ctx.call(client.verify_email(&token)).await?;
            println!("{}", reply.message);
        }
        AuthCommand::ForgotPassword { email } => {
            let reply = ctx.call(client.request_password_reset(&email)).await?;
            println!("{}", reply.message);
        }
        AuthCommand::ResetPassword {
            token,
            new_password,
        } => {
            let reply = ctx.call(client.reset_password(&token, &new_password)).await?;
            println!("{}", reply.message);
        }
        AuthCommand::TwoFactor(TwoFactorCommand::Enable) => {
            let setup = ctx.call(client.enable_2fa()).await?;
            ctx.emit(&setup, |s| {
                println!("Add this secret to your authenticator app: {}", s.secret);
                if !s.backup_codes.is_empty() {
                    println!("Backup codes (store them somewhere safe):");
                    for code in &s.backup_codes {
                        println!("  {}", code);
                    }
                }
                println!("Then confirm with `tunicoin auth 2fa verify <code>`.");
            })?;
        }
        AuthCommand::TwoFactor(TwoFactorCommand::Verify { code }) => {
            let reply = ctx.call(client.verify_2fa(&code)).await?;
            println!("{}", reply.message);
        }
        AuthCommand::TwoFactor(TwoFactorCommand::Disable { code }) => {
            let reply = ctx.call(client.disable_2fa(&code)).await?;
            println!("{}", reply.message);
        }
    }
    Ok(())
}
