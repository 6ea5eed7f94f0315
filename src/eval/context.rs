use serde::{Deserialize, Serialize};

/// The kind of data-movement action being gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    FileTransfer,
    Clipboard,
    Print,
    Upload,
    Screenshot,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::FileTransfer => "file_transfer",
            ActionKind::Clipboard => "clipboard",
            ActionKind::Print => "print",
            ActionKind::Upload => "upload",
            ActionKind::Screenshot => "screenshot",
        }
    }
}

/// A destination endpoint class outside the browser profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Usb,
    NetworkShare,
    Clipboard,
    Printer,
    CloudStorage,
}

// ── Wire-format event ──

/// One data-movement event as received on stdin.
#[derive(Debug, Deserialize)]
pub struct ActionEvent {
    pub action: ActionKind,
    #[serde(default)]
    pub source: Option<Endpoint>,
    #[serde(default)]
    pub destination: Option<Endpoint>,
    #[serde(default)]
    pub file: Option<FileInfo>,
}

/// Where data comes from or goes to. `component` is only meaningful on
/// destinations; sources are always identified by URL.
#[derive(Debug, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub component: Option<Component>,
}

#[derive(Debug, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
}

// ── Evaluation context ──

/// Flattened, read-only facts about one candidate action.
///
/// Built once per event and handed to every rule's condition tree. Absent
/// facts stay `None`; predicates that need an absent fact do not match.
#[derive(Debug)]
pub struct EvaluationContext {
    pub action: ActionKind,
    pub source_url: Option<String>,
    pub destination_url: Option<String>,
    pub destination_component: Option<Component>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub size_bytes: Option<u64>,
}

impl EvaluationContext {
    /// Flatten an incoming event into an evaluation context.
    pub fn from_event(event: &ActionEvent) -> Self {
        Self {
            action: event.action,
            source_url: event.source.as_ref().and_then(|e| e.url.clone()),
            destination_url: event.destination.as_ref().and_then(|e| e.url.clone()),
            destination_component: event.destination.as_ref().and_then(|e| e.component),
            file_name: event.file.as_ref().and_then(|f| f.name.clone()),
            mime_type: event.file.as_ref().and_then(|f| f.mime_type.clone()),
            size_bytes: event.file.as_ref().and_then(|f| f.size_bytes),
        }
    }

    /// Lowercased file extension, without the dot.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name.as_deref()?;
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Host of the source URL, if it parses as one.
    pub fn source_host(&self) -> Option<String> {
        host_of(self.source_url.as_deref()?)
    }

    /// Host of the destination URL, if it parses as one.
    pub fn destination_host(&self) -> Option<String> {
        host_of(self.destination_url.as_deref()?)
    }
}

fn host_of(raw: &str) -> Option<String> {
    let parsed = url::Url::parse(raw).ok()?;
    parsed.host_str().map(str::to_string)
}
