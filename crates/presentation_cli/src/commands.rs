//! Command execution
//!
//! Every resource command is checked against the route table before a
//! request is sent. Results are returned as JSON values for printing.

use anyhow::{Context, anyhow, bail};
use application::{GuardDecision, LOGIN_PATH, RouteGuard, RouteTable, SessionState};
use domain::{DemandForecastQuery, NewUser, Page, Role, UserUpdate};
use infrastructure::WaterOpsContext;
use integration_api::{
    ApiError, AssetsClient, ComplaintsClient, DemandClient, NotificationsClient,
    UsersClient, WaterInfrastructureClient, WaterQualityClient,
};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::cli::{
    AssetsAction, Commands, ComplaintsAction, DemandAction, InfrastructureAction,
    NotificationsAction, PageArgs, QualityAction, UsersAction,
};

/// Run one command against a started context
#[instrument(skip_all, fields(route = command.route()))]
pub async fn execute(
    command: Commands,
    context: &WaterOpsContext,
    cancel: &CancellationToken,
) -> anyhow::Result<Value> {
    if let Some(route) = command.route() {
        authorize(route, context).await?;
    }
    let gateway = context.gateway().scoped(cancel.clone());

    match command {
        Commands::Login { username, password } => {
            let password = password
                .map(SecretString::from)
                .ok_or_else(|| anyhow!("A password is required (--password or WATEROPS_PASSWORD)"))?;
            let state = context
                .session()
                .login(&username, &password)
                .await
                .context("Login failed")?;
            Ok(json!({ "session": state, "username": username }))
        },
        Commands::Register {
            username,
            email,
            full_name,
            password,
        } => register(&UsersClient::new(gateway), username, email, full_name, password).await,
        Commands::Logout => {
            context.session().logout().await?;
            Ok(json!({ "session": SessionState::Unauthenticated }))
        },
        Commands::Whoami => {
            let state = context.session().establish().await?;
            let handle = context.session().handle();
            Ok(json!({
                "session": state,
                "username": handle.username(),
                "identity": handle.identity(),
            }))
        },
        Commands::Routes => {
            let state = context.session().establish().await?;
            let role = state
                .role()
                .ok_or_else(|| anyhow!("Not logged in. Run `waterops-cli login` first."))?;
            let table = RouteTable::default();
            let visible: Vec<_> = table.visible_routes(role).collect();
            to_json(&visible)
        },
        Commands::Dashboard => {
            let metrics = context.dashboard().load(cancel).await?;
            to_json(&metrics)
        },
        Commands::Users { action } => users(UsersClient::new(gateway), action).await,
        Commands::Infrastructure { action } => {
            infrastructure(WaterInfrastructureClient::new(gateway), action).await
        },
        Commands::Quality { action } => quality(WaterQualityClient::new(gateway), action).await,
        Commands::Complaints { action } => {
            complaints(ComplaintsClient::new(gateway), action).await
        },
        Commands::Assets { action } => assets(AssetsClient::new(gateway), action).await,
        Commands::Demand { action } => demand(DemandClient::new(gateway), action).await,
        Commands::Notifications { action } => {
            notifications(NotificationsClient::new(gateway), action).await
        },
    }
}

/// Shortest password accepted at registration
const MIN_PASSWORD_LEN: usize = 6;

/// Self-service sign-up; the new account always gets the `user` role
///
/// The stored session is left as it is.
async fn register(
    client: &UsersClient,
    username: String,
    email: String,
    full_name: Option<String>,
    password: String,
) -> anyhow::Result<Value> {
    if username.trim().is_empty() {
        bail!("A username is required.");
    }
    if email.trim().is_empty() {
        bail!("An email address is required.");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        bail!("The password must be at least {MIN_PASSWORD_LEN} characters long.");
    }

    let user = NewUser {
        username,
        email: Some(email),
        full_name: full_name.filter(|name| !name.trim().is_empty()),
        password,
        is_active: true,
        role: Some(Role::User),
    };
    let created = client.create(&user).await.map_err(api_failure)?;
    Ok(json!({
        "registered": created,
        "next": format!("waterops-cli login --username {}", created.username),
    }))
}

/// Gate a view on the session role
async fn authorize(route: &'static str, context: &WaterOpsContext) -> anyhow::Result<()> {
    let rule = RouteTable::default()
        .rule_for(route)
        .ok_or_else(|| anyhow!("Unknown view {route}"))?;
    let required = rule.required_role;

    match RouteGuard::new(rule).authorize(context.session()).await? {
        GuardDecision::Allow => {
            debug!(route, "Access granted");
            Ok(())
        },
        GuardDecision::Redirect(target) if target == LOGIN_PATH => {
            bail!("Not logged in. Run `waterops-cli login --username <name>` first.")
        },
        GuardDecision::Redirect(_) => bail!("This view requires the {required} role."),
        GuardDecision::Pending => bail!("Your identity could not be confirmed. Try again."),
    }
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Attach the user-facing message to an API error
fn api_failure(err: ApiError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

/// Validated paging window
fn window(args: PageArgs) -> anyhow::Result<Page> {
    Ok(args.page().validate()?)
}

fn deleted(id: i64) -> Value {
    json!({ "deleted": id })
}

async fn users(client: UsersClient, action: UsersAction) -> anyhow::Result<Value> {
    match action {
        UsersAction::List(page) => to_json(&client.list(window(page)?).await.map_err(api_failure)?),
        UsersAction::Get { id } => to_json(&client.get(id).await.map_err(api_failure)?),
        UsersAction::Create {
            username,
            password,
            email,
            full_name,
            role,
        } => {
            let user = NewUser {
                username,
                email,
                full_name,
                password,
                is_active: true,
                role,
            };
            to_json(&client.create(&user).await.map_err(api_failure)?)
        },
        UsersAction::Update {
            id,
            email,
            full_name,
            role,
            active,
        } => {
            let update = UserUpdate {
                email,
                full_name,
                role,
                is_active: active,
                ..UserUpdate::default()
            };
            to_json(&client.update(id, &update).await.map_err(api_failure)?)
        },
        UsersAction::Delete { id } => {
            client.delete(id).await.map_err(api_failure)?;
            Ok(deleted(id))
        },
    }
}

async fn infrastructure(
    client: WaterInfrastructureClient,
    action: InfrastructureAction,
) -> anyhow::Result<Value> {
    match action {
        InfrastructureAction::List(page) => {
            to_json(&client.list(window(page)?).await.map_err(api_failure)?)
        },
        InfrastructureAction::Get { id } => to_json(&client.get(id).await.map_err(api_failure)?),
        InfrastructureAction::Leaks { id } => {
            to_json(&client.leaks_for(id).await.map_err(api_failure)?)
        },
        InfrastructureAction::AllLeaks(page) => {
            to_json(&client.all_leaks(window(page)?).await.map_err(api_failure)?)
        },
    }
}

async fn quality(client: WaterQualityClient, action: QualityAction) -> anyhow::Result<Value> {
    match action {
        QualityAction::List(page) => {
            to_json(&client.list(window(page)?).await.map_err(api_failure)?)
        },
        QualityAction::Get { id } => to_json(&client.get(id).await.map_err(api_failure)?),
        QualityAction::Alerts(page) => {
            to_json(&client.alerts(window(page)?).await.map_err(api_failure)?)
        },
        QualityAction::Acknowledge { id } => {
            to_json(&client.acknowledge_alert(id).await.map_err(api_failure)?)
        },
    }
}

async fn complaints(client: ComplaintsClient, action: ComplaintsAction) -> anyhow::Result<Value> {
    match action {
        ComplaintsAction::List(page) => {
            to_json(&client.list(window(page)?).await.map_err(api_failure)?)
        },
        ComplaintsAction::Get { id } => to_json(&client.get(id).await.map_err(api_failure)?),
        ComplaintsAction::Assign { id, assigned_to } => {
            to_json(&client.assign(id, assigned_to).await.map_err(api_failure)?)
        },
        ComplaintsAction::Resolve { id } => {
            to_json(&client.resolve(id).await.map_err(api_failure)?)
        },
        ComplaintsAction::Categories => {
            to_json(&client.categories().await.map_err(api_failure)?)
        },
    }
}

async fn assets(client: AssetsClient, action: AssetsAction) -> anyhow::Result<Value> {
    match action {
        AssetsAction::List(page) => {
            to_json(&client.list(window(page)?).await.map_err(api_failure)?)
        },
        AssetsAction::Get { id } => to_json(&client.get(id).await.map_err(api_failure)?),
        AssetsAction::Maintenance { asset_id, page } => to_json(
            &client
                .maintenance_history(asset_id, window(page)?)
                .await
                .map_err(api_failure)?,
        ),
        AssetsAction::Due => to_json(&client.maintenance_due().await.map_err(api_failure)?),
    }
}

async fn demand(client: DemandClient, action: DemandAction) -> anyhow::Result<Value> {
    match action {
        DemandAction::List(page) => {
            to_json(&client.list(window(page)?).await.map_err(api_failure)?)
        },
        DemandAction::Get { id } => to_json(&client.get(id).await.map_err(api_failure)?),
        DemandAction::Forecast { location, from, to } => {
            let query = DemandForecastQuery {
                location,
                date_from: from,
                date_to: to,
            };
            to_json(&client.forecast(&query).await.map_err(api_failure)?)
        },
        DemandAction::DistributionPlans(page) => to_json(
            &client
                .distribution_plans(window(page)?)
                .await
                .map_err(api_failure)?,
        ),
        DemandAction::InvestmentPlans(page) => to_json(
            &client
                .investment_plans(window(page)?)
                .await
                .map_err(api_failure)?,
        ),
    }
}

async fn notifications(
    client: NotificationsClient,
    action: NotificationsAction,
) -> anyhow::Result<Value> {
    match action {
        NotificationsAction::List(page) => to_json(
            &client
                .for_current_user(window(page)?)
                .await
                .map_err(api_failure)?,
        ),
        NotificationsAction::Read { id } => {
            to_json(&client.mark_read(id).await.map_err(api_failure)?)
        },
        NotificationsAction::ReadAll => {
            to_json(&client.mark_all_read().await.map_err(api_failure)?)
        },
        NotificationsAction::Settings { user_id } => {
            to_json(&client.settings(user_id).await.map_err(api_failure)?)
        },
    }
}
