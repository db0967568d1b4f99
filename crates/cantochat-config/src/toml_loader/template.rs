//! Default TOML config template with inline documentation comments.

use crate::schema::CONFIG_SCHEMA_VERSION;

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    format!(
        "# cantochat configuration\n# Schema version {CONFIG_SCHEMA_VERSION}\n{BODY}"
    )
}

const BODY: &str = r##"# Only override what you want to change -- missing fields use defaults.

[backend]
# base_url = "http://127.0.0.1:5000"      # /health, /init, /chat
# ws_url = "ws://127.0.0.1:5000/ws/chat"  # streaming chat endpoint
# transport = "websocket"                 # websocket | http
# connect_timeout_secs = 5                # 1-60
# init_timeout_secs = 70                  # 5-300
# chat_timeout_secs = 120                 # 5-600, http transport only
# health_check = true

[session]
# notification_capacity = 16              # 1-256
# event_buffer = 64                       # 1-4096

[logging]
# level = "info"                          # trace | debug | info | warn | error

# Scenarios selectable with `cantochat --scenario <id>`.
#
# [[scenarios]]
# id = "restaurant"
# title = "餐厅点餐"
# prompt = "..."
"##;
