use log::info;
use num_format::{Locale, ToFormattedString};

use spc_index::prelude::*;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli::AppArgs {
        graph,
        label,
        ordering,
        info,
    } = cli::create()?;

    info!("Reading graph from: {:?}", graph);
    let g = read_graph(File::open(&graph)?)?;
    info!(
        "Loaded graph (node_count = {}, edge_count = {})",
        g.node_count().to_formatted_string(&Locale::en),
        g.edge_count().to_formatted_string(&Locale::en),
    );

    let start = Instant::now();
    let index = IndexBuilder::new().order_scheme(ordering).build(g)?;
    let elapsed = start.elapsed();
    info!("Index construction took {:?}", elapsed);

    let label_count = index.write_to_path(&label)?;
    info!(
        "total # of label entries: {}",
        label_count.to_formatted_string(&Locale::en)
    );

    if let Some(info_path) = info {
        let mut out = BufWriter::new(File::create(info_path)?);
        writeln!(out, "Index time: {} ms", elapsed.as_secs_f64() * 1e3)?;
        writeln!(out, "Index Num: {label_count}")?;
    }

    Ok(())
}

mod cli {
    use pico_args::Arguments;
    use spc_index::OrderScheme;
    use std::{convert::Infallible, ffi::OsStr, path::PathBuf};

    #[derive(Debug)]
    pub(crate) struct AppArgs {
        pub(crate) graph: PathBuf,
        pub(crate) label: PathBuf,
        pub(crate) ordering: OrderScheme,
        pub(crate) info: Option<PathBuf>,
    }

    pub(crate) fn create() -> Result<AppArgs, Box<dyn std::error::Error>> {
        let mut pargs = Arguments::from_env();

        fn as_path_buf(arg: &OsStr) -> Result<PathBuf, Infallible> {
            Ok(arg.into())
        }

        let args = AppArgs {
            graph: pargs.value_from_os_str(["-g", "--graph"], as_path_buf)?,
            label: pargs.value_from_os_str(["-l", "--label"], as_path_buf)?,
            ordering: pargs
                .opt_value_from_str(["-o", "--ordering"])?
                .unwrap_or(OrderScheme::Degree),
            info: pargs.opt_value_from_os_str(["-f", "--info"], as_path_buf)?,
        };

        Ok(args)
    }
}
