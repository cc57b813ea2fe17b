use crate::entity_mediation::domain::{
    AuthenticationInfo, Credentials, EntityKind, GmpCommand, XmlElement,
};
use crate::entity_mediation::services::check_response;
use crate::shared::error::HyperionError;
use crate::shared::Result;
use async_trait::async_trait;

/// A status-checked GMP response: the raw document plus its parsed tree.
#[derive(Debug, Clone)]
pub struct GmpResponse {
    pub raw: String,
    pub root: XmlElement,
}

/// GmpClient port for one authenticated-or-not GMP connection
///
/// Implementors only provide [`GmpClient::send`]; the entity operations are
/// built on top of it so every transport speaks the same commands.
///
/// # Errors
/// Non-2xx statuses surface as `HyperionError::GmpStatus`, transport
/// failures as `HyperionError::GmpTransport`.
#[async_trait]
pub trait GmpClient: Send + Sync {
    /// Sends one command and returns the raw response document.
    async fn send(&self, command: &GmpCommand) -> Result<String>;

    async fn request(&self, command: &GmpCommand) -> Result<GmpResponse> {
        let raw = self.send(command).await?;
        let root = check_response(command.name(), &raw)?;
        Ok(GmpResponse { raw, root })
    }

    /// Authenticates the connection; gvmd answers bad credentials with 400.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthenticationInfo> {
        let command = GmpCommand::new("authenticate").with_child(
            GmpCommand::new("credentials")
                .with_child(GmpCommand::new("username").with_text(credentials.username.as_str()))
                .with_child(GmpCommand::new("password").with_text(credentials.password.as_str())),
        );

        let response = match self.request(&command).await {
            Ok(response) => response,
            Err(e) => {
                return match e.downcast_ref::<HyperionError>() {
                    Some(HyperionError::GmpStatus { status: 400, .. }) => {
                        Err(HyperionError::AuthenticationFailed.into())
                    }
                    _ => Err(e),
                }
            }
        };

        Ok(AuthenticationInfo {
            role: response.root.child_text("role").map(str::to_string),
            timezone: response.root.child_text("timezone").map(str::to_string),
        })
    }

    /// Lists entities of `kind` matching a gvmd filter string.
    async fn get_entities(
        &self,
        kind: EntityKind,
        filter: &str,
        details: bool,
    ) -> Result<GmpResponse> {
        let mut command = list_command(kind).with_attribute("filter", filter);
        if details {
            command = command.with_attribute("details", "1");
        }
        self.request(&command).await
    }

    async fn get_entity(&self, kind: EntityKind, id: &str) -> Result<GmpResponse> {
        let command = list_command(kind)
            .with_attribute(kind.id_attribute(), id)
            .with_attribute("details", "1");
        self.request(&command).await
    }

    async fn delete_entity(&self, kind: EntityKind, id: &str) -> Result<()> {
        let name = kind.delete_command().ok_or_else(|| {
            HyperionError::invalid_input(format!("{} entities cannot be deleted", kind))
        })?;
        let command = GmpCommand::new(name).with_attribute(kind.id_attribute(), id);
        self.request(&command).await?;
        Ok(())
    }

    /// Copies an entity and returns the id of the copy.
    async fn clone_entity(&self, kind: EntityKind, id: &str) -> Result<String> {
        let name = kind.create_command().ok_or_else(|| {
            HyperionError::invalid_input(format!("{} entities cannot be cloned", kind))
        })?;
        let command = GmpCommand::new(name).with_child(GmpCommand::new("copy").with_text(id));
        let response = self.request(&command).await?;

        response
            .root
            .attribute("id")
            .map(str::to_string)
            .ok_or_else(|| {
                HyperionError::GmpProtocol {
                    command: command.name().to_string(),
                    details: "Response carries no id".to_string(),
                }
                .into()
            })
    }

    async fn get_version(&self) -> Result<String> {
        let command = GmpCommand::new("get_version");
        let response = self.request(&command).await?;
        Ok(response
            .root
            .child_text("version")
            .unwrap_or_default()
            .to_string())
    }
}

fn list_command(kind: EntityKind) -> GmpCommand {
    kind.list_attributes()
        .iter()
        .fold(GmpCommand::new(kind.list_command()), |command, (key, value)| {
            command.with_attribute(*key, *value)
        })
}
