use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::formatter::error::FormatterError;
use crate::module::Module;

/// Writes `module` as JSON indented by `indent` spaces, followed by a newline.
///
/// Nothing is written when encoding fails, so a failed attribute table never
/// leaves half a document behind.
pub fn render_json<W: Write>(mut writer: W, module: &Module, indent: usize) -> Result<(), FormatterError> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    {
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        module.serialize(&mut serializer)?;
    }

    buf.push(b'\n');
    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}
