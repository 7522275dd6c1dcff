use log::{info, warn};
use num_format::{Locale, ToFormattedString};

use spc_index::prelude::*;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli::AppArgs {
        label,
        updates,
        new_label,
        info,
    } = cli::create()?;

    info!("Reading index from: {:?}", label);
    let mut index = SpcIndex::read_from_path(&label)?;
    index.merge();

    let stream = read_updates(File::open(&updates)?)?;
    info!("Applying {} edge updates", stream.len());

    let mut info_out = info
        .map(|path| File::create(path).map(BufWriter::new))
        .transpose()?;

    let mut total_millis = 0.0;
    let mut applied = 0_usize;
    for update in stream {
        let start = Instant::now();
        let line = match update {
            EdgeUpdate::Insert(u, v) => {
                if u == v || index.graph().has_edge(u, v) {
                    warn!("skipping invalid insertion ({u}, {v})");
                    continue;
                }
                let stats = index.insert_edge(u, v);
                format!(
                    "i\t{u}\t{v}\t{}\t{}\t{}",
                    stats.renewed_counts, stats.renewed_dists, stats.inserted
                )
            }
            EdgeUpdate::Delete(u, v) => {
                if u == v || !index.graph().has_edge(u, v) {
                    warn!("skipping invalid deletion ({u}, {v})");
                    continue;
                }
                let stats = index.remove_edge(u, v);
                format!(
                    "d\t{u}\t{v}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    stats.affected_a,
                    stats.affected_b,
                    stats.receivers_a,
                    stats.receivers_b,
                    stats.renewed_counts,
                    stats.renewed_dists,
                    stats.inserted,
                    stats.removed,
                    u8::from(stats.isolated),
                )
            }
        };
        let millis = start.elapsed().as_secs_f64() * 1e3;
        total_millis += millis;
        applied += 1;

        if let Some(out) = info_out.as_mut() {
            writeln!(out, "{line}\t{millis:.3}")?;
        }
    }

    if let Some(out) = info_out.as_mut() {
        writeln!(out, "Average: {} ms", total_millis / applied.max(1) as f64)?;
    }
    info!(
        "Applied {applied} updates, {:.3} ms on average",
        total_millis / applied.max(1) as f64
    );

    let label_count = index.write_to_path(&new_label)?;
    info!(
        "total # of label entries: {}",
        label_count.to_formatted_string(&Locale::en)
    );

    Ok(())
}

mod cli {
    use pico_args::Arguments;
    use std::{convert::Infallible, ffi::OsStr, path::PathBuf};

    #[derive(Debug)]
    pub(crate) struct AppArgs {
        pub(crate) label: PathBuf,
        pub(crate) updates: PathBuf,
        pub(crate) new_label: PathBuf,
        pub(crate) info: Option<PathBuf>,
    }

    pub(crate) fn create() -> Result<AppArgs, Box<dyn std::error::Error>> {
        let mut pargs = Arguments::from_env();

        fn as_path_buf(arg: &OsStr) -> Result<PathBuf, Infallible> {
            Ok(arg.into())
        }

        let args = AppArgs {
            label: pargs.value_from_os_str(["-l", "--label"], as_path_buf)?,
            updates: pargs.value_from_os_str(["-u", "--updates"], as_path_buf)?,
            new_label: pargs.value_from_os_str(["-n", "--new-label"], as_path_buf)?,
            info: pargs.opt_value_from_os_str(["-i", "--info"], as_path_buf)?,
        };

        Ok(args)
    }
}
