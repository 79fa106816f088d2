//! Example: list the items of a track
//!
//! Reads a project file and prints every item of the named track with its
//! time range and source.
//!
//! ```text
//! cargo run -p rpp --example list_items -- show.rpp "Music Track"
//! ```

use std::env;

use rpp::{ProjectReader, RppError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let (Some(path), Some(track)) = (args.next(), args.next()) else {
        eprintln!("usage: list_items <PROJECT.rpp> <TRACK NAME>");
        return Ok(());
    };

    let reader = ProjectReader::default();
    let doc = match reader.read_file(&path) {
        Ok(doc) => doc,
        Err(RppError::Parse { err, .. }) => {
            for diag in err.diagnostics() {
                eprintln!("{diag}");
            }
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    for item in reader.track_items(&doc, &track)? {
        println!(
            "{:>10.3} {:>10.3}  {}  ({})",
            item.position(),
            item.end(),
            item.name(),
            item.source()
        );
    }

    Ok(())
}
