use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Plain confirmation payload, e.g. for deletes.
#[derive(Serialize, Debug)]
pub struct Message {
    pub message: String,
}
