//! Compiled-in service definitions.

use crate::types::{ActionDescriptor, ReactionDescriptor, ServiceCatalogEntry};

struct Descriptor {
    name: &'static str,
    description: &'static str,
}

struct ServiceDefinition {
    name: &'static str,
    actions: &'static [Descriptor],
    reactions: &'static [Descriptor],
}

const fn d(name: &'static str, description: &'static str) -> Descriptor {
    Descriptor { name, description }
}

const SERVICES: &[ServiceDefinition] = &[
    ServiceDefinition {
        name: "Weather",
        actions: &[
            d("temperature_change", "Triggers when temperature changes"),
            d("humidity_change", "Triggers when humidity changes"),
        ],
        reactions: &[
            d("send_email", "Sends an email notification"),
            d("log_data", "Logs the weather data"),
        ],
    },
    ServiceDefinition {
        name: "GitHub",
        actions: &[
            d("new_commit", "Triggers on new commit"),
            d("new_issue", "Triggers on new issue"),
        ],
        reactions: &[
            d("create_issue", "Creates a new issue"),
            d("post_comment", "Posts a comment on an issue"),
        ],
    },
    ServiceDefinition {
        name: "Timer",
        actions: &[
            d("every_hour", "Triggers every hour"),
            d("every_day", "Triggers every day"),
        ],
        reactions: &[d("print_log", "Prints a log message")],
    },
];

impl ServiceDefinition {
    fn to_entry(&self) -> ServiceCatalogEntry {
        ServiceCatalogEntry {
            name: self.name.to_string(),
            actions: self
                .actions
                .iter()
                .map(|a| ActionDescriptor {
                    name: a.name.to_string(),
                    description: a.description.to_string(),
                })
                .collect(),
            reactions: self
                .reactions
                .iter()
                .map(|r| ReactionDescriptor {
                    name: r.name.to_string(),
                    description: r.description.to_string(),
                })
                .collect(),
        }
    }
}

/// Builds the catalog in declaration order.
///
/// Every call constructs new values from the constant definitions.
pub fn services() -> Vec<ServiceCatalogEntry> {
    SERVICES.iter().map(ServiceDefinition::to_entry).collect()
}
