use serde_json::{json, Map, Value};

pub const DEFAULT_THEME: &str = "light";
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Static defaults every loaded document is merged over.
pub fn default_document() -> Map<String, Value> {
    let Value::Object(document) = json!({
        "app_settings": {
            "last_client_id": null,
            "app_language": "de",
            "app_theme": DEFAULT_THEME,
            "log_level": DEFAULT_LOG_LEVEL,
            "log_to_file": false
        },
        "advisor": {
            "salutation": null,
            "given_name": "",
            "middle_name": "",
            "surname": "",
            "birth_date": ""
        },
        "db_hosts": {
            "local": "192.168.178.78",
            "external": "mydyn.dns.name"
        },
        "database": {
            "host_mode": "auto",
            "port": 3309,
            "dbname": "meine_db",
            "user": "user",
            "password": "",
            "charset": "",
            "auto_commit": false
        },
        "paperless_hosts": {
            "local": "192.168.178.78",
            "external": "mydyn.dns.name"
        },
        "paperless": {
            "enabled": false,
            "host_mode": "auto",
            "port": 3309
        },
        "custom_theme": {
            "main": "#4caf50",
            "secondary": "#cccccc",
            "handle": "#ffffff",
            "background": "#f5f5f5",
            "error": "#a51d2d"
        }
    }) else {
        return Map::new();
    };
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_every_top_level_section() {
        let document = default_document();
        let sections: Vec<&str> = document.keys().map(String::as_str).collect();
        assert_eq!(
            sections,
            vec![
                "app_settings",
                "advisor",
                "db_hosts",
                "database",
                "paperless_hosts",
                "paperless",
                "custom_theme"
            ]
        );
    }

    #[test]
    fn defaults_select_light_theme() {
        let document = default_document();
        assert_eq!(document["app_settings"]["app_theme"], json!("light"));
    }
}
