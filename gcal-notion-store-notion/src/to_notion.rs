//! Record types → Notion property JSON.

use gcal_notion_core::constants::{
    PROP_DATE, PROP_DESCRIPTION, PROP_EVENT_LINK, PROP_GCAL_ID, PROP_LOCATION, PROP_NAME, PROP_STATUS,
};
use gcal_notion_core::ports::RecordFilter;
use gcal_notion_core::{RecordPayload, RecordProperties};
use serde_json::{Map, Value, json};

fn title(content: &str) -> Value {
    json!({ "title": [{ "text": { "content": content } }] })
}

fn rich_text(content: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": content } }] })
}

/// The `properties` object of a page create/update request.
/// Optional properties that are `None` are left out entirely.
pub fn properties_json(props: &RecordProperties) -> Value {
    let mut map = Map::new();
    map.insert(PROP_NAME.into(), title(&props.name));
    map.insert(PROP_GCAL_ID.into(), rich_text(&props.gcal_id));
    map.insert(PROP_STATUS.into(), rich_text(&props.status));

    if let Some(ref date) = props.date {
        map.insert(
            PROP_DATE.into(),
            json!({
                "date": {
                    "start": date.start.to_store_string(),
                    "end": date.end.to_store_string(),
                }
            }),
        );
    }
    if let Some(ref description) = props.description {
        map.insert(PROP_DESCRIPTION.into(), rich_text(description));
    }
    if let Some(ref location) = props.location {
        map.insert(PROP_LOCATION.into(), rich_text(location));
    }
    if let Some(ref link) = props.event_link {
        map.insert(PROP_EVENT_LINK.into(), json!({ "url": link }));
    }

    Value::Object(map)
}

/// Request body for `POST /v1/pages` or `PATCH /v1/pages/{id}`.
pub fn page_body(payload: &RecordPayload) -> Value {
    let mut body = json!({ "properties": properties_json(&payload.properties) });
    if let Some(ref parent) = payload.parent {
        body["parent"] = json!({ "database_id": parent.collection_id });
    }
    body
}

/// Database query filter on a rich-text property.
pub fn filter_json(filter: &RecordFilter) -> Value {
    match filter {
        RecordFilter::Equals { property, value } => json!({
            "property": property,
            "rich_text": { "equals": value },
        }),
        RecordFilter::IsNotEmpty { property } => json!({
            "property": property,
            "rich_text": { "is_not_empty": true },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcal_notion_core::Parent;
    use gcal_notion_core::event::EventTime;
    use gcal_notion_core::record::DateProperty;

    fn props() -> RecordProperties {
        RecordProperties {
            name: "Planning".into(),
            gcal_id: "evt-1".into(),
            status: "confirmed".into(),
            date: None,
            description: None,
            location: None,
            event_link: None,
        }
    }

    #[test]
    fn required_properties_only() {
        let json = properties_json(&props());
        assert_eq!(json["Name"]["title"][0]["text"]["content"], "Planning");
        assert_eq!(json["GCAL ID"]["rich_text"][0]["text"]["content"], "evt-1");
        assert_eq!(json["Status"]["rich_text"][0]["text"]["content"], "confirmed");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn optional_properties_when_present() {
        let mut p = props();
        p.date = Some(DateProperty {
            start: EventTime::DateTime("2025-03-21T09:00:00+01:00".parse().unwrap()),
            end: EventTime::DateTime("2025-03-21T10:00:00+01:00".parse().unwrap()),
        });
        p.description = Some("Agenda".into());
        p.location = Some("HQ".into());
        p.event_link = Some("https://zoom.us/j/1".into());

        let json = properties_json(&p);
        assert_eq!(json["Date"]["date"]["start"], "2025-03-21T09:00:00+01:00");
        assert_eq!(json["Date"]["date"]["end"], "2025-03-21T10:00:00+01:00");
        assert_eq!(json["Description"]["rich_text"][0]["text"]["content"], "Agenda");
        assert_eq!(json["Location"]["rich_text"][0]["text"]["content"], "HQ");
        assert_eq!(json["Event Link"]["url"], "https://zoom.us/j/1");
    }

    #[test]
    fn parent_only_when_creating() {
        let update = page_body(&RecordPayload {
            properties: props(),
            parent: None,
        });
        assert!(update.get("parent").is_none());

        let create = page_body(&RecordPayload {
            properties: props(),
            parent: Some(Parent {
                collection_id: "db-1".into(),
            }),
        });
        assert_eq!(create["parent"]["database_id"], "db-1");
    }

    #[test]
    fn filters() {
        let eq = filter_json(&RecordFilter::Equals {
            property: "GCAL ID".into(),
            value: "evt-1".into(),
        });
        assert_eq!(eq["property"], "GCAL ID");
        assert_eq!(eq["rich_text"]["equals"], "evt-1");

        let not_empty = filter_json(&RecordFilter::IsNotEmpty {
            property: "GCAL ID".into(),
        });
        assert_eq!(not_empty["rich_text"]["is_not_empty"], true);
    }
}
