use crate::error::FormatError;
use crate::parser::raw_task::{ExtendedAttributes, RawTask};
use crate::parser::xml_tree::{parse_tree, XmlElement};
use tracing::{debug, info};

/// Signature of an OLE compound file, the container used by binary programmes.
const COMPOUND_FILE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const DEFAULT_PROJECT_NAME: &str = "Untitled programme";

/// A parsed programme: its name and task records in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDocument {
    pub project_name: String,
    pub tasks: Vec<RawTask>,
}

/// Parser for XML programme interchange documents
/// (`Project` > `Tasks` > `Task`).
///
/// Task fields may be child elements or attributes of the `Task` element.
/// Accepted aliases:
/// - `Critical` for `IsCritical`
/// - `UID` when `ID` is missing
/// - `FieldName` over `FieldID` inside `ExtendedAttribute`
pub struct ProjectXmlParser;

impl ProjectXmlParser {
    /// Parse raw file bytes, rejecting binary programmes up front.
    pub fn parse_bytes(bytes: &[u8]) -> Result<ScheduleDocument, FormatError> {
        if bytes.starts_with(&COMPOUND_FILE_MAGIC) {
            return Err(FormatError::UnsupportedBinary);
        }
        let content = std::str::from_utf8(bytes).map_err(|_| FormatError::NotText)?;
        Self::parse(content)
    }

    /// Parse document text into task records.
    pub fn parse(content: &str) -> Result<ScheduleDocument, FormatError> {
        let root = parse_tree(content)?;
        if root.name != "Project" {
            return Err(FormatError::MissingTaskPath);
        }

        let task_nodes: Vec<&XmlElement> = root
            .child("Tasks")
            .map(|tasks| tasks.children_named("Task").collect())
            .unwrap_or_default();
        if task_nodes.is_empty() {
            return Err(FormatError::MissingTaskPath);
        }

        let project_name = root
            .field("Name")
            .or_else(|| root.field("Title"))
            .unwrap_or(DEFAULT_PROJECT_NAME)
            .to_string();

        let tasks: Vec<RawTask> = task_nodes.into_iter().map(Self::parse_task).collect();
        info!(project = %project_name, tasks = tasks.len(), "parsed schedule document");

        Ok(ScheduleDocument {
            project_name,
            tasks,
        })
    }

    fn parse_task(node: &XmlElement) -> RawTask {
        let text = |name: &str| node.field(name).map(String::from);

        let task = RawTask {
            id: text("ID").or_else(|| text("UID")),
            name: text("Name"),
            start: text("Start"),
            finish: text("Finish"),
            duration: text("Duration"),
            percent_complete: text("PercentComplete"),
            priority: text("Priority"),
            constraint_type: text("ConstraintType"),
            is_critical: text("IsCritical").or_else(|| text("Critical")),
            milestone_flag: text("Milestone"),
            notes: text("Notes"),
            extended_attributes: Self::parse_extended_attributes(node),
        };
        debug!(id = ?task.id, name = ?task.name, "read task record");
        task
    }

    fn parse_extended_attributes(node: &XmlElement) -> ExtendedAttributes {
        let pairs = node
            .children_named("ExtendedAttribute")
            .filter_map(|attr| {
                let key = attr.field("FieldName").or_else(|| attr.field("FieldID"))?;
                let value = attr.field("Value").unwrap_or_default();
                Some((key.to_string(), value.to_string()))
            })
            .collect();
        ExtendedAttributes::new(pairs)
    }
}
