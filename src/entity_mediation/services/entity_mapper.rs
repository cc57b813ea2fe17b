use crate::entity_mediation::domain::{Entity, EntityKind, EntityListing, XmlElement};
use chrono::{DateTime, Utc};

/// EntityMapper maps GMP response elements onto the common entity model.
pub struct EntityMapper;

impl EntityMapper {
    /// Entity elements of a list or get response.
    ///
    /// Only children carrying an `id` attribute count: `get_info` reuses the
    /// `info` name for its pagination element.
    pub fn entity_elements<'a>(
        kind: EntityKind,
        response: &'a XmlElement,
    ) -> impl Iterator<Item = &'a XmlElement> {
        response
            .children_named(kind.element())
            .filter(|element| element.attribute("id").is_some())
    }

    pub fn entity_ids(kind: EntityKind, response: &XmlElement) -> Vec<String> {
        Self::entity_elements(kind, response)
            .filter_map(|element| element.attribute("id"))
            .map(str::to_string)
            .collect()
    }

    pub fn entity_from_element(kind: EntityKind, element: &XmlElement) -> Entity {
        let mut entity = Entity::new(kind, element.attribute("id").unwrap_or_default());
        entity.name = element.child_text("name").map(str::to_string);
        entity.comment = element.child_text("comment").map(str::to_string);
        entity.owner = element
            .child("owner")
            .and_then(|owner| owner.child_text("name"))
            .map(str::to_string);
        entity.creation_time = element.child_text("creation_time").and_then(parse_timestamp);
        entity.modification_time = element
            .child_text("modification_time")
            .and_then(parse_timestamp);
        entity.writable = element.child_text("writable") == Some("1");
        entity.in_use = element.child_text("in_use") == Some("1");
        entity
    }

    /// Reads entities plus the `<plural start max>` and `<kind_count>`
    /// bookkeeping of a list response. Missing counts fall back to the
    /// number of returned entities.
    pub fn listing_from_response(kind: EntityKind, response: &XmlElement) -> EntityListing {
        let entities: Vec<Entity> = Self::entity_elements(kind, response)
            .map(|element| Self::entity_from_element(kind, element))
            .collect();

        let plural = kind.plural();
        let window = response
            .children_named(&plural)
            .find(|element| element.attribute("start").is_some());
        let start = window
            .and_then(|element| element.attribute("start"))
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|&start| start > 0)
            .unwrap_or(1);
        let rows = window
            .and_then(|element| element.attribute("max"))
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|&max| max > 0)
            .map(|max| max as usize);

        let count_element = kind.count_element();
        let counts = response.child(&count_element);
        let total = counts
            .and_then(|count| count.text().trim().parse::<usize>().ok())
            .unwrap_or(entities.len());
        let filtered = counts
            .and_then(|count| count.child_text("filtered"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(total);

        EntityListing {
            entities,
            start,
            rows,
            total,
            filtered,
        }
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKS_RESPONSE: &str = r#"<get_tasks_response status="200" status_text="OK">
        <task id="t1">
            <owner><name>admin</name></owner>
            <name>Weekly scan</name>
            <comment>dmz</comment>
            <creation_time>2024-03-01T10:00:00Z</creation_time>
            <modification_time>2024-03-02T11:30:00+01:00</modification_time>
            <writable>1</writable>
            <in_use>0</in_use>
        </task>
        <task id="t2"><name>Nightly</name><writable>0</writable><in_use>1</in_use></task>
        <filters id=""><term>first=3 rows=2 sort=name</term></filters>
        <tasks start="3" max="2"/>
        <task_count>9<filtered>7</filtered><page>2</page></task_count>
    </get_tasks_response>"#;

    #[test]
    fn test_listing_reads_entities_and_counts() {
        let response = XmlElement::parse(TASKS_RESPONSE).unwrap();
        let listing = EntityMapper::listing_from_response(EntityKind::Task, &response);

        assert_eq!(listing.entities.len(), 2);
        assert_eq!(listing.start, 3);
        assert_eq!(listing.rows, Some(2));
        assert_eq!(listing.total, 9);
        assert_eq!(listing.filtered, 7);
    }

    #[test]
    fn test_common_fields_are_mapped() {
        let response = XmlElement::parse(TASKS_RESPONSE).unwrap();
        let listing = EntityMapper::listing_from_response(EntityKind::Task, &response);
        let task = &listing.entities[0];

        assert_eq!(task.id, "t1");
        assert_eq!(task.kind, EntityKind::Task);
        assert_eq!(task.name.as_deref(), Some("Weekly scan"));
        assert_eq!(task.comment.as_deref(), Some("dmz"));
        assert_eq!(task.owner.as_deref(), Some("admin"));
        assert_eq!(
            task.creation_time.unwrap().to_rfc3339(),
            "2024-03-01T10:00:00+00:00"
        );
        assert_eq!(
            task.modification_time.unwrap().to_rfc3339(),
            "2024-03-02T10:30:00+00:00"
        );
        assert!(task.writable);
        assert!(!task.in_use);
        assert!(listing.entities[1].in_use);
    }

    #[test]
    fn test_info_pagination_element_is_not_an_entity() {
        let response = XmlElement::parse(
            r#"<get_info_response status="200" status_text="OK">
                <info id="1.3.6.1.4.1.25623.1.0.10330"><name>Services</name></info>
                <info start="1" max="10"/>
                <info_count>1<filtered>1</filtered></info_count>
            </get_info_response>"#,
        )
        .unwrap();

        let listing = EntityMapper::listing_from_response(EntityKind::Nvt, &response);
        assert_eq!(listing.entities.len(), 1);
        assert_eq!(listing.entities[0].name.as_deref(), Some("Services"));
        assert_eq!(listing.start, 1);
        assert_eq!(listing.rows, Some(10));
    }

    #[test]
    fn test_missing_counts_fall_back_to_entity_count() {
        let response = XmlElement::parse(
            r#"<get_alerts_response status="200"><alert id="a"/><alert id="b"/></get_alerts_response>"#,
        )
        .unwrap();
        let listing = EntityMapper::listing_from_response(EntityKind::Alert, &response);
        assert_eq!(listing.total, 2);
        assert_eq!(listing.filtered, 2);
        assert_eq!(listing.start, 1);
        assert_eq!(listing.rows, None);
    }

    #[test]
    fn test_entity_ids_in_response_order() {
        let response = XmlElement::parse(TASKS_RESPONSE).unwrap();
        assert_eq!(
            EntityMapper::entity_ids(EntityKind::Task, &response),
            vec!["t1".to_string(), "t2".to_string()]
        );
    }
}
