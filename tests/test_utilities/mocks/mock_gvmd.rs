use async_trait::async_trait;
use hyperion::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const DEFAULT_ROWS: usize = 10;

#[derive(Debug, Clone)]
pub struct MockEntity {
    pub id: String,
    pub name: String,
}

#[derive(Default)]
struct GvmdState {
    /// Entities keyed by GMP element name ("task", "asset", ...)
    datasets: HashMap<String, Vec<MockEntity>>,
    sent: Vec<GmpCommand>,
    connections: usize,
}

/// In-memory stand-in for gvmd
///
/// Serves list, get, delete, clone, authenticate and get_version commands
/// from per-element datasets and records every command it receives. Only
/// `admin`/`admin` authenticates. List filters honour `uuid=`, `first=`,
/// `rows=` and `sort-reverse=`.
#[derive(Clone, Default)]
pub struct MockGvmd {
    state: Arc<Mutex<GvmdState>>,
}

#[allow(dead_code)]
impl MockGvmd {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds entities `<prefix>1..=<count>` to the dataset of `element`.
    pub fn with_entities(self, element: &str, prefix: &str, count: usize) -> Self {
        let entities = (1..=count)
            .map(|n| MockEntity {
                id: format!("{}{}", prefix, n),
                name: format!("{} {}", element, n),
            })
            .collect();
        self.state
            .lock()
            .unwrap()
            .datasets
            .insert(element.to_string(), entities);
        self
    }

    pub fn entity_ids(&self, element: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .datasets
            .get(element)
            .map(|entities| entities.iter().map(|e| e.id.clone()).collect())
            .unwrap_or_default()
    }

    pub fn sent(&self) -> Vec<GmpCommand> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn sent_named(&self, name: &str) -> Vec<GmpCommand> {
        self.sent()
            .into_iter()
            .filter(|command| command.name() == name)
            .collect()
    }

    pub fn connections(&self) -> usize {
        self.state.lock().unwrap().connections
    }

    fn respond(&self, command: &GmpCommand) -> String {
        let mut state = self.state.lock().unwrap();
        state.sent.push(command.clone());

        let name = command.name();
        if name == "authenticate" {
            return authenticate(command);
        }
        if name == "get_version" {
            return r#"<get_version_response status="200" status_text="OK"><version>22.4</version></get_version_response>"#.to_string();
        }
        if let Some(plural) = name.strip_prefix("get_") {
            let element = if plural == "info" { "info" } else { plural.strip_suffix('s').unwrap_or(plural) };
            return list(&state, name, plural, element, command);
        }
        if let Some(element) = name.strip_prefix("delete_") {
            return delete(&mut state, name, element, command);
        }
        if let Some(element) = name.strip_prefix("create_") {
            let source = command.child("copy").and_then(GmpCommand::text).unwrap_or_default();
            let copy = MockEntity {
                id: format!("{}-copy", source),
                name: format!("Clone of {}", source),
            };
            let id = copy.id.clone();
            state
                .datasets
                .entry(element.to_string())
                .or_default()
                .push(copy);
            return format!(
                r#"<{}_response status="201" status_text="OK, resource created" id="{}"/>"#,
                name, id
            );
        }

        format!(r#"<{}_response status="400" status_text="Bogus command name"/>"#, name)
    }
}

fn authenticate(command: &GmpCommand) -> String {
    let credentials = command.child("credentials");
    let field = |name: &str| {
        credentials
            .and_then(|c| c.child(name))
            .and_then(GmpCommand::text)
            .unwrap_or_default()
            .to_string()
    };

    if field("username") == "admin" && field("password") == "admin" {
        r#"<authenticate_response status="200" status_text="OK"><role>Admin</role><timezone>UTC</timezone></authenticate_response>"#.to_string()
    } else {
        r#"<authenticate_response status="400" status_text="Authentication failed"/>"#.to_string()
    }
}

fn entity_xml(element: &str, entity: &MockEntity) -> String {
    format!(
        "<{0} id=\"{1}\"><owner><name>admin</name></owner><name>{2}</name><comment/><creation_time>2024-01-01T00:00:00Z</creation_time><modification_time>2024-01-02T00:00:00Z</modification_time><writable>1</writable><in_use>0</in_use></{0}>",
        element, entity.id, entity.name
    )
}

fn list(state: &GvmdState, name: &str, plural: &str, element: &str, command: &GmpCommand) -> String {
    let all = state.datasets.get(element).cloned().unwrap_or_default();

    if let Some(id) = command.attribute(&format!("{}_id", element)) {
        return match all.iter().find(|entity| entity.id == id) {
            Some(entity) => format!(
                r#"<{0}_response status="200" status_text="OK">{1}</{0}_response>"#,
                name,
                entity_xml(element, entity)
            ),
            None => format!(
                r#"<{}_response status="404" status_text="Failed to find {} '{}'"/>"#,
                name, element, id
            ),
        };
    }

    let filter = command.attribute("filter").unwrap_or_default();
    let mut uuids: Option<Vec<&str>> = None;
    let mut first = 1usize;
    let mut rows: i64 = DEFAULT_ROWS as i64;
    let mut reverse = false;
    for term in filter.split_whitespace() {
        if let Some(id) = term.strip_prefix("uuid=") {
            uuids.get_or_insert_with(Vec::new).push(id);
        } else if let Some(value) = term.strip_prefix("first=") {
            first = value.parse().unwrap_or(1).max(1);
        } else if let Some(value) = term.strip_prefix("rows=") {
            rows = value.parse().unwrap_or(DEFAULT_ROWS as i64);
        } else if term.starts_with("sort-reverse=") {
            reverse = true;
        }
    }

    let mut matched: Vec<MockEntity> = match &uuids {
        Some(ids) => all.iter().filter(|e| ids.contains(&e.id.as_str())).cloned().collect(),
        None => all.clone(),
    };
    if reverse {
        matched.reverse();
    }
    let filtered = matched.len();
    let page: Vec<MockEntity> = matched
        .into_iter()
        .skip(first - 1)
        .take(if rows < 0 { usize::MAX } else { rows as usize })
        .collect();

    let body: String = page.iter().map(|entity| entity_xml(element, entity)).collect();
    format!(
        r#"<{name}_response status="200" status_text="OK">{body}<filters id=""><term>{filter}</term></filters><{plural} start="{first}" max="{rows}"/><{element}_count>{total}<filtered>{filtered}</filtered><page>{page}</page></{element}_count></{name}_response>"#,
        name = name,
        body = body,
        filter = filter,
        plural = plural,
        first = first,
        rows = rows,
        element = element,
        total = all.len(),
        filtered = filtered,
        page = page.len(),
    )
}

fn delete(state: &mut GvmdState, name: &str, element: &str, command: &GmpCommand) -> String {
    let id = command
        .attribute(&format!("{}_id", element))
        .unwrap_or_default()
        .to_string();
    let entities = state.datasets.entry(element.to_string()).or_default();
    match entities.iter().position(|entity| entity.id == id) {
        Some(index) => {
            entities.remove(index);
            format!(r#"<{}_response status="200" status_text="OK"/>"#, name)
        }
        None => format!(
            r#"<{}_response status="404" status_text="Failed to find {} '{}'"/>"#,
            name, element, id
        ),
    }
}

#[async_trait]
impl GmpClient for MockGvmd {
    async fn send(&self, command: &GmpCommand) -> Result<String> {
        Ok(self.respond(command))
    }
}

#[async_trait]
impl GmpConnector for MockGvmd {
    async fn connect(&self) -> Result<Box<dyn GmpClient>> {
        self.state.lock().unwrap().connections += 1;
        Ok(Box::new(self.clone()))
    }
}
