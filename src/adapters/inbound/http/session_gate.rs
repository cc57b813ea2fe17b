use async_graphql::parser::parse_query;
use async_graphql::parser::types::{
    DocumentOperations, ExecutableDocument, FragmentDefinition, OperationDefinition, Selection,
    SelectionSet,
};
use async_graphql::{Name, Positioned};
use std::collections::{HashMap, HashSet};

/// Root fields that work without a session.
const SESSIONLESS_FIELDS: [&str; 2] = ["login", "logout"];

/// Whether executing the request needs a logged-in session.
///
/// Documents that fail to parse, or whose operation cannot be selected,
/// return `false` so normal execution reports the error.
pub fn requires_session(query: &str, operation_name: Option<&str>) -> bool {
    let Ok(document) = parse_query(query) else {
        return false;
    };
    let Some(operation) = select_operation(&document, operation_name) else {
        return false;
    };

    let mut root_fields = Vec::new();
    let mut visited = HashSet::new();
    collect_root_fields(
        &operation.selection_set.node,
        &document.fragments,
        &mut visited,
        &mut root_fields,
    );

    root_fields
        .iter()
        .any(|field| !SESSIONLESS_FIELDS.contains(&field.as_str()))
}

fn select_operation<'a>(
    document: &'a ExecutableDocument,
    operation_name: Option<&str>,
) -> Option<&'a OperationDefinition> {
    match &document.operations {
        DocumentOperations::Single(operation) => Some(&operation.node),
        DocumentOperations::Multiple(operations) => match operation_name {
            Some(name) => operations.get(name).map(|operation| &operation.node),
            None if operations.len() == 1 => operations.values().next().map(|operation| &operation.node),
            None => None,
        },
    }
}

fn collect_root_fields(
    selection_set: &SelectionSet,
    fragments: &HashMap<Name, Positioned<FragmentDefinition>>,
    visited: &mut HashSet<Name>,
    fields: &mut Vec<String>,
) {
    for selection in &selection_set.items {
        match &selection.node {
            Selection::Field(field) => fields.push(field.node.name.node.to_string()),
            Selection::InlineFragment(fragment) => {
                collect_root_fields(&fragment.node.selection_set.node, fragments, visited, fields)
            }
            Selection::FragmentSpread(spread) => {
                let name = &spread.node.fragment_name.node;
                if !visited.insert(name.clone()) {
                    continue;
                }
                if let Some(fragment) = fragments.get(name) {
                    collect_root_fields(&fragment.node.selection_set.node, fragments, visited, fields);
                }
            }
        }
    }
}
