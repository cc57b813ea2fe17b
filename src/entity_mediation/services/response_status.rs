use crate::entity_mediation::domain::XmlElement;
use crate::shared::error::HyperionError;
use crate::shared::Result;

/// Parses a GMP response and fails on any non-2xx `status`.
pub fn check_response(command: &str, raw: &str) -> Result<XmlElement> {
    let root = XmlElement::parse(raw).map_err(|e| HyperionError::GmpProtocol {
        command: command.to_string(),
        details: format!("{:#}", e),
    })?;

    let status = root
        .attribute("status")
        .and_then(|status| status.parse::<u16>().ok())
        .ok_or_else(|| HyperionError::GmpProtocol {
            command: command.to_string(),
            details: "Missing or invalid status attribute".to_string(),
        })?;

    if !(200..300).contains(&status) {
        let status_text = root
            .attribute("status_text")
            .unwrap_or("Unknown error")
            .to_string();
        return Err(HyperionError::GmpStatus {
            command: command.to_string(),
            status,
            status_text,
        }
        .into());
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status_returns_root() {
        let root = check_response(
            "delete_task",
            r#"<delete_task_response status="200" status_text="OK"/>"#,
        )
        .unwrap();
        assert_eq!(root.name(), "delete_task_response");
    }

    #[test]
    fn test_error_status_carries_status_text() {
        let error = check_response(
            "get_tasks",
            r#"<get_tasks_response status="404" status_text="Failed to find task 'x'"/>"#,
        )
        .unwrap_err();

        match error.downcast_ref::<HyperionError>() {
            Some(HyperionError::GmpStatus {
                command,
                status,
                status_text,
            }) => {
                assert_eq!(command, "get_tasks");
                assert_eq!(*status, 404);
                assert_eq!(status_text, "Failed to find task 'x'");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_status_is_protocol_error() {
        let error = check_response("get_version", "<get_version_response/>").unwrap_err();
        assert!(matches!(
            error.downcast_ref::<HyperionError>(),
            Some(HyperionError::GmpProtocol { .. })
        ));
    }

    #[test]
    fn test_garbage_is_protocol_error() {
        let error = check_response("get_version", "<<<").unwrap_err();
        assert!(matches!(
            error.downcast_ref::<HyperionError>(),
            Some(HyperionError::GmpProtocol { .. })
        ));
    }
}
