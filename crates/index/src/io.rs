//! Binary index files.
//!
//! Layout (native byte order, little-endian on every supported target):
//! a one-byte shape flag, `n` as `u32`, the adjacency lists (`u32` length
//! prefix each), the label lists, and the vertex order as a trailer of `n`
//! `u32`s. The split shape stores the canonical and non-canonical list per
//! vertex, the merged shape a single list per vertex; the flag makes the
//! file self-describing, so one reader handles both.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use byte_slice_cast::{AsByteSlice, AsMutByteSlice};
use log::info;

use crate::label::LabelEntry;
use crate::order::rank_from_order;
use crate::{Error, SpcIndex, UndirectedGraph};

const SHAPE_SPLIT: u8 = 0;
const SHAPE_MERGED: u8 = 1;

impl SpcIndex {
    /// Writes the index in its current shape (split before
    /// [`SpcIndex::merge`], merged after). Returns the number of label
    /// entries written.
    pub fn write<W: Write>(&self, output: &mut W) -> Result<u64, Error> {
        let shape = if self.is_merged() {
            SHAPE_MERGED
        } else {
            SHAPE_SPLIT
        };
        output.write_all(&[shape])?;

        let node_count = self.node_count();
        output.write_all([node_count].as_byte_slice())?;

        for v in 0..node_count {
            let targets = self.graph.neighbors(v);
            output.write_all([targets.len() as u32].as_byte_slice())?;
            output.write_all(targets.as_byte_slice())?;
        }

        let mut written = 0_u64;
        for v in 0..node_count {
            if shape == SHAPE_SPLIT {
                written += write_labels(output, self.canonical_labels(v))?;
            }
            written += write_labels(output, self.labels(v))?;
        }

        output.write_all(self.order.as_byte_slice())?;

        Ok(written)
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<u64, Error> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        let written = self.write(&mut writer)?;
        writer.flush()?;
        info!(
            "Wrote {} label entries to {:?}",
            written,
            path.as_ref().display()
        );
        Ok(written)
    }

    /// Reads an index of either shape, restoring exactly the stored lists.
    /// The adjacency lists, the order trailer, and every label entry are
    /// validated before the index is returned, so corrupt files surface as
    /// errors instead of out-of-range panics later on.
    pub fn read<R: Read>(input: &mut R) -> Result<Self, Error> {
        let mut shape = [0_u8; 1];
        input.read_exact(&mut shape)?;
        let [shape] = shape;
        if shape != SHAPE_SPLIT && shape != SHAPE_MERGED {
            return Err(Error::InvalidInput {
                message: format!("unknown index shape flag {shape}"),
            });
        }

        let node_count = read_u32(input)? as usize;

        let mut adjacency = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            let degree = read_u32(input)? as usize;
            adjacency.push(read_u32s(input, degree)?);
        }
        let graph = UndirectedGraph::from_adjacency(adjacency);
        graph.validate()?;

        let mut dl = Vec::new();
        let mut cl = Vec::with_capacity(node_count);
        if shape == SHAPE_SPLIT {
            dl.reserve(node_count);
        }
        for _ in 0..node_count {
            if shape == SHAPE_SPLIT {
                let canonical = read_u32(input)? as usize;
                dl.push(read_entries(input, canonical)?);
            }
            let merged = read_u32(input)? as usize;
            cl.push(read_entries(input, merged)?);
        }

        // the order trailer indexes the rank array, so it must be a
        // permutation before anything dereferences it
        let order = read_u32s(input, node_count)?;
        let mut seen = vec![false; node_count];
        for &v in &order {
            if v as usize >= node_count || std::mem::replace(&mut seen[v as usize], true) {
                return Err(Error::InvalidInput {
                    message: "vertex order trailer is not a permutation".to_string(),
                });
            }
        }
        let rank = rank_from_order(&order);

        let index = SpcIndex {
            graph,
            dl,
            cl,
            order,
            rank,
        };
        index.validate()?;

        info!(
            "Read {} shape index with {} label entries",
            if shape == SHAPE_SPLIT { "split" } else { "merged" },
            index.label_count()
        );

        Ok(index)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read(&mut reader)
    }
}

fn write_labels<W: Write>(output: &mut W, labels: &[LabelEntry]) -> Result<u64, Error> {
    output.write_all([labels.len() as u32].as_byte_slice())?;
    output.write_all(labels.as_byte_slice())?;
    Ok(labels.len() as u64)
}

fn read_u32<R: Read>(input: &mut R) -> Result<u32, Error> {
    let mut value = [0_u32; 1];
    input.read_exact(value.as_mut_byte_slice())?;
    Ok(value[0])
}

fn read_u32s<R: Read>(input: &mut R, len: usize) -> Result<Vec<u32>, Error> {
    let mut values = vec![0_u32; len];
    input.read_exact(values.as_mut_byte_slice())?;
    Ok(values)
}

fn read_entries<R: Read>(input: &mut R, len: usize) -> Result<Vec<LabelEntry>, Error> {
    let mut entries = vec![LabelEntry::default(); len];
    input.read_exact(entries.as_mut_byte_slice())?;
    Ok(entries)
}
