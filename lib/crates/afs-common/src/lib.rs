pub mod protocol;
pub mod types;

pub use protocol::{
    ACTOR_PORT, CALL_PATH, HEALTH_PATH, LABEL_ENV, LABEL_MANAGED, actor_port_spec, labels,
};
pub use types::*;
