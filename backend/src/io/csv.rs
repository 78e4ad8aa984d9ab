//! Flat CSV dump of every program in an instance.

use std::io::Write;
use std::path::Path;

use super::write_file;
use crate::error::GeneratorResult;
use crate::models::Instance;

pub const CSV_HEADER: &str = "channel_id,channel_name,program_id,start,end,genre,score,url";

/// Write one row per program to `path`. Channel names are double-quoted and
/// the url column is empty for programs without a link.
pub fn write_debug_csv(instance: &Instance, path: &Path) -> GeneratorResult<()> {
    write_file(path, &render_debug_csv(instance)?, "write_debug_csv")?;
    log::info!("Debug dump written to {}", path.display());
    Ok(())
}

/// The debug dump as bytes, header included.
pub fn render_debug_csv(instance: &Instance) -> GeneratorResult<Vec<u8>> {
    let mut out = Vec::new();
    write_rows(instance, &mut out)?;
    Ok(out)
}

fn write_rows<W: Write>(instance: &Instance, out: &mut W) -> GeneratorResult<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for channel in &instance.channels {
        let name = quote(&channel.channel_name);
        for program in &channel.programs {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{}",
                channel.channel_id,
                name,
                program.program_id,
                program.start,
                program.end,
                program.genre,
                program.score,
                program.link.as_deref().unwrap_or("")
            )?;
        }
    }
    Ok(())
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
