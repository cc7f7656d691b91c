use std::fmt;

use clap::Args;
use reptitrack_app::context::AppContext;

#[derive(Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long, env = "API_PASSWORD", hide_env_values = true)]
    password: String,
}

impl fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginArgs")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

pub(crate) async fn login(ctx: &AppContext, args: LoginArgs) -> Result<(), String> {
    let response = ctx
        .auth
        .login(&args.email, &args.password)
        .await
        .map_err(|error| format!("login failed: {error}"))?;

    if !response.is_success {
        return Err(response
            .message
            .unwrap_or_else(|| "login rejected".to_string()));
    }

    let token = ctx.session.token().ok_or("login returned no token")?;

    if let Some(user) = ctx.session.user() {
        println!("user_id: {}", user.id);
        println!("roles: {}", user.roles.join(", "));
    }

    println!("api_token: {token}");
    println!("export it as API_TOKEN to reuse this session");

    Ok(())
}

pub(crate) async fn show(ctx: &AppContext) -> Result<(), String> {
    let account = ctx
        .auth
        .account_detail()
        .await
        .map_err(|error| format!("failed to load account: {error}"))?;

    println!("id: {}", account.id);
    println!("name: {}", account.full_name.as_deref().unwrap_or("-"));
    println!("email: {}", account.email.as_deref().unwrap_or("-"));
    println!("roles: {}", account.roles.join(", "));

    Ok(())
}
