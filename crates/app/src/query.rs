use log::{info, warn};
use rayon::prelude::*;

use spc_index::prelude::*;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli::AppArgs {
        label,
        queries,
        answers,
        graph,
        updates,
    } = cli::create()?;

    info!("Reading index from: {:?}", label);
    let mut index = SpcIndex::read_from_path(&label)?;
    index.merge();

    let batch = read_queries(File::open(&queries)?)?;
    for &(s, t) in &batch {
        if s == t || s >= index.node_count() || t >= index.node_count() {
            return Err(Box::new(Error::InvalidInput {
                message: format!("invalid query pair ({s}, {t})"),
            }));
        }
    }
    info!("Answering {} queries", batch.len());

    let mut total_micros = 0.0;
    let mut results = Vec::with_capacity(batch.len());
    {
        let mut out = BufWriter::new(File::create(&answers)?);
        for &(s, t) in &batch {
            let start = Instant::now();
            let (d, c) = index.count(s, t);
            let micros = start.elapsed().as_secs_f64() * 1e6;
            total_micros += micros;
            writeln!(out, "{s}\t{t}\t{d}\t{c}\t{micros:.3}")?;
            results.push((d, c));
        }
    }
    info!(
        "Hub labeling query took {:.3} microseconds on average",
        total_micros / batch.len().max(1) as f64
    );

    // correctness-proof mode: answer the same batch straight off the raw
    // graph and compare
    if let Some(graph_path) = graph {
        let mut g = read_graph(File::open(&graph_path)?)?;

        if let Some(update_path) = updates {
            for update in read_updates(File::open(&update_path)?)? {
                match update {
                    EdgeUpdate::Insert(u, v) => g.insert_edge(u, v),
                    EdgeUpdate::Delete(u, v) => g.remove_edge(u, v),
                }
            }
        }

        let oracle = batch
            .par_iter()
            .map(|&(s, t)| {
                let start = Instant::now();
                let result = bi_bfs_count(&g, s, t);
                (result, start.elapsed().as_secs_f64() * 1e6)
            })
            .collect::<Vec<_>>();

        let oracle_path = sibling_with_prefix(&answers, "bibfs_");
        let mut out = BufWriter::new(File::create(&oracle_path)?);
        for (&(s, t), ((d, c), micros)) in batch.iter().zip(&oracle) {
            writeln!(out, "{s}\t{t}\t{d}\t{c}\t{micros:.3}")?;
        }

        let mut mismatches = 0_usize;
        for (i, &(s, t)) in batch.iter().enumerate() {
            let answer = results[i];
            let (expected, _) = oracle[i];
            if answer != expected {
                warn!("mismatch for pair ({s}, {t}): labeling {answer:?}, BFS {expected:?}");
                mismatches += 1;
            }
        }

        if mismatches == 0 {
            info!("All {} answers match the BFS reference", batch.len());
        } else {
            warn!("{mismatches} answers differ from the BFS reference");
        }
    }

    Ok(())
}

fn sibling_with_prefix(path: &Path, prefix: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{prefix}{file_name}"))
}

mod cli {
    use pico_args::Arguments;
    use std::{convert::Infallible, ffi::OsStr, path::PathBuf};

    #[derive(Debug)]
    pub(crate) struct AppArgs {
        pub(crate) label: PathBuf,
        pub(crate) queries: PathBuf,
        pub(crate) answers: PathBuf,
        pub(crate) graph: Option<PathBuf>,
        pub(crate) updates: Option<PathBuf>,
    }

    pub(crate) fn create() -> Result<AppArgs, Box<dyn std::error::Error>> {
        let mut pargs = Arguments::from_env();

        fn as_path_buf(arg: &OsStr) -> Result<PathBuf, Infallible> {
            Ok(arg.into())
        }

        let args = AppArgs {
            label: pargs.value_from_os_str(["-l", "--label"], as_path_buf)?,
            queries: pargs.value_from_os_str(["-q", "--queries"], as_path_buf)?,
            answers: pargs.value_from_os_str(["-a", "--answers"], as_path_buf)?,
            graph: pargs.opt_value_from_os_str(["-g", "--graph"], as_path_buf)?,
            updates: pargs.opt_value_from_os_str(["-u", "--updates"], as_path_buf)?,
        };

        Ok(args)
    }
}
