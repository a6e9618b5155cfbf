//! JSON export of routings and generation history.
//!
//! Geometry is written as point lists: per path, every segment's start
//! point followed by the end pin, each point as `[x, y]`.
//!
//! [`HistoryWriter`] is a [`GenerationCallback`] that buffers one
//! [`GenerationRecord`] per generation and hands full chunks to a
//! background thread, so file I/O never stalls the solve loop. Chunks land
//! in `ga_history_00001.json`, `ga_history_00002.json`, … and the first
//! one also carries the board size and pin list.

use crate::error::ExportError;
use crate::ga::{GenerationCallback, GenerationReport};
use crate::model::{Problem, Solution};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use tracing::instrument;

/// Records per history file.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

const FILE_PREFIX: &str = "ga_history_";

/// Point lists of every path of `solution`.
pub fn point_arrays(solution: &Solution) -> Vec<Vec<[i32; 2]>> {
    solution
        .point_lists()
        .into_iter()
        .map(|points| points.into_iter().map(|p| p.to_array()).collect())
        .collect()
}

/// Board dimensions and the flattened pin list `[s0, e0, s1, e1, …]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: [i32; 2],
    pub points: Vec<[i32; 2]>,
}

impl BoardSnapshot {
    /// Captures the board of `problem`.
    pub fn of(problem: &Problem) -> Self {
        Self {
            board: [problem.width(), problem.height()],
            points: problem
                .pairs()
                .iter()
                .flat_map(|pair| [pair.start.to_array(), pair.end.to_array()])
                .collect(),
        }
    }
}

/// One routing with the generation it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub generation: usize,
    pub fitness: f64,
    pub paths: Vec<Vec<[i32; 2]>>,
}

impl SolutionRecord {
    /// Captures `solution`.
    pub fn new(solution: &Solution, generation: usize, fitness: f64) -> Self {
        Self {
            generation,
            fitness,
            paths: point_arrays(solution),
        }
    }
}

/// One history entry: the generation best plus population statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation number.
    pub gen: usize,
    /// Fitness of the generation best.
    pub fit: f64,
    /// Point lists of the generation best.
    pub paths: Vec<Vec<[i32; 2]>>,
    /// Mean fitness of the generation.
    #[serde(rename = "gAvg")]
    pub g_avg: f64,
    /// Worst fitness of the generation.
    #[serde(rename = "wtF")]
    pub wt_f: f64,
}

impl GenerationRecord {
    /// Captures a generation report.
    pub fn from_report(report: &GenerationReport<'_>) -> Self {
        Self {
            gen: report.generation,
            fit: report.generation_best_fitness,
            paths: point_arrays(report.generation_best),
            g_avg: report.mean_fitness(),
            wt_f: report.generation_worst_fitness,
        }
    }
}

/// A board snapshot with a payload list, the layout of the first history
/// chunk and of multi-solution exports.
#[derive(Serialize)]
struct Document<'a, T> {
    board: [i32; 2],
    points: &'a [[i32; 2]],
    data: &'a [T],
}

/// Serializes one routing to JSON.
pub fn solution_to_json(
    solution: &Solution,
    generation: usize,
    fitness: f64,
    pretty: bool,
) -> Result<String, ExportError> {
    to_json(&SolutionRecord::new(solution, generation, fitness), pretty)
}

/// Serializes several routings of `problem` with the board snapshot.
pub fn solutions_to_json(
    problem: &Problem,
    records: &[SolutionRecord],
    pretty: bool,
) -> Result<String, ExportError> {
    let board = BoardSnapshot::of(problem);
    to_json(
        &Document {
            board: board.board,
            points: &board.points,
            data: records,
        },
        pretty,
    )
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, ExportError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Background chunked writer of [`GenerationRecord`]s.
///
/// Cloning yields another handle on the same writer, so one clone can be
/// registered with a solver while the original is kept for
/// [`finish`](Self::finish).
///
/// # Examples
///
/// ```no_run
/// use u_pcbroute::export::HistoryWriter;
/// use u_pcbroute::ga::{Solver, SolverConfig};
/// use u_pcbroute::model::Problem;
///
/// let problem = Problem::from_file("board.txt")?;
/// let history = HistoryWriter::new(&problem, "out")?;
/// let mut solver = Solver::new(problem, SolverConfig::default())?;
/// solver.add_callback(history.clone());
/// solver.run();
/// let files = history.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct HistoryWriter {
    shared: Arc<Mutex<Shared>>,
}

struct Shared {
    chunk_size: usize,
    buffer: Vec<GenerationRecord>,
    sender: Option<Sender<Vec<GenerationRecord>>>,
    worker: Option<JoinHandle<WorkerOutcome>>,
}

struct WorkerOutcome {
    written: Vec<PathBuf>,
    failure: Option<ExportError>,
}

impl HistoryWriter {
    /// Starts a writer that stores chunks of [`DEFAULT_CHUNK_SIZE`]
    /// records under `directory`, creating it if needed.
    pub fn new(problem: &Problem, directory: impl Into<PathBuf>) -> Result<Self, ExportError> {
        Self::with_chunk_size(problem, directory, DEFAULT_CHUNK_SIZE)
    }

    /// Starts a writer with a custom chunk size (at least 1).
    pub fn with_chunk_size(
        problem: &Problem,
        directory: impl Into<PathBuf>,
        chunk_size: usize,
    ) -> Result<Self, ExportError> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)?;

        let board = BoardSnapshot::of(problem);
        let (sender, receiver) = mpsc::channel();
        let worker = std::thread::Builder::new()
            .name("history-writer".into())
            .spawn(move || write_chunks(&directory, &board, receiver))?;

        let chunk_size = chunk_size.max(1);
        Ok(Self {
            shared: Arc::new(Mutex::new(Shared {
                chunk_size,
                buffer: Vec::with_capacity(chunk_size.min(DEFAULT_CHUNK_SIZE)),
                sender: Some(sender),
                worker: Some(worker),
            })),
        })
    }

    /// Buffers one record, handing the buffer off once it is full.
    pub fn record(&self, record: GenerationRecord) {
        let mut shared = self.lock();
        shared.buffer.push(record);
        if shared.buffer.len() >= shared.chunk_size {
            let chunk = std::mem::take(&mut shared.buffer);
            shared.send(chunk);
        }
    }

    /// Flushes the remaining records, waits for the background thread and
    /// returns the files written in order.
    ///
    /// Handles cloned from this writer stop recording afterwards.
    ///
    /// # Errors
    /// Returns the first write failure, or
    /// [`ExportError::WriterPanicked`] if the thread died.
    #[instrument(level = "debug", skip_all)]
    pub fn finish(self) -> Result<Vec<PathBuf>, ExportError> {
        let worker = {
            let mut shared = self.lock();
            let remainder = std::mem::take(&mut shared.buffer);
            if !remainder.is_empty() {
                shared.send(remainder);
            }
            shared.sender = None;
            shared.worker.take()
        };

        let Some(worker) = worker else {
            return Ok(Vec::new());
        };
        let outcome = worker.join().map_err(|_| ExportError::WriterPanicked)?;
        tracing::debug!(files = outcome.written.len(), "History written");
        match outcome.failure {
            Some(err) => Err(err),
            None => Ok(outcome.written),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Shared {
    fn send(&self, chunk: Vec<GenerationRecord>) {
        match &self.sender {
            Some(sender) => {
                if sender.send(chunk).is_err() {
                    tracing::warn!("history writer thread is gone; chunk dropped");
                }
            }
            None => tracing::warn!("history writer already finished; chunk dropped"),
        }
    }
}

impl GenerationCallback for HistoryWriter {
    fn on_generation(&mut self, report: &GenerationReport<'_>) {
        self.record(GenerationRecord::from_report(report));
    }
}

fn write_chunks(
    directory: &Path,
    board: &BoardSnapshot,
    chunks: Receiver<Vec<GenerationRecord>>,
) -> WorkerOutcome {
    let mut outcome = WorkerOutcome {
        written: Vec::new(),
        failure: None,
    };

    for (index, records) in chunks.into_iter().enumerate() {
        let path = directory.join(format!("{FILE_PREFIX}{:05}.json", index + 1));
        let result = if index == 0 {
            write_json(
                &path,
                &Document {
                    board: board.board,
                    points: &board.points,
                    data: &records,
                },
            )
        } else {
            write_json(&path, &records)
        };

        match result {
            Ok(()) => outcome.written.push(path),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Failed to write history chunk");
                outcome.failure.get_or_insert(err);
            }
        }
    }
    outcome
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{Solver, SolverConfig};
    use crate::model::{Direction, Path as RoutePath, PinPair, Point, Segment};

    fn problem() -> Problem {
        Problem::new(
            8,
            6,
            vec![
                PinPair::new(Point::new(0, 0), Point::new(3, 0)),
                PinPair::new(Point::new(1, 4), Point::new(6, 2)),
            ],
        )
        .unwrap()
    }

    fn straight_solution() -> Solution {
        let first = RoutePath::with_segments(
            Point::new(0, 0),
            Point::new(3, 0),
            vec![Segment::new(Point::new(0, 0), Direction::Right, 3)],
        );
        let second = RoutePath::with_segments(
            Point::new(1, 4),
            Point::new(6, 2),
            vec![
                Segment::new(Point::new(1, 4), Direction::Right, 5),
                Segment::new(Point::new(6, 4), Direction::Up, 2),
            ],
        );
        Solution::new(vec![first, second])
    }

    #[test]
    fn test_board_snapshot() {
        let snapshot = BoardSnapshot::of(&problem());
        assert_eq!(snapshot.board, [8, 6]);
        assert_eq!(snapshot.points, vec![[0, 0], [3, 0], [1, 4], [6, 2]]);
    }

    #[test]
    fn test_solution_json_layout() {
        let json = solution_to_json(&straight_solution(), 12, 20.5, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["generation"], 12);
        assert_eq!(value["fitness"], 20.5);
        assert_eq!(
            value["paths"],
            serde_json::json!([[[0, 0], [3, 0]], [[1, 4], [6, 4], [6, 2]]])
        );
    }

    #[test]
    fn test_many_solutions_embed_board() {
        let records = vec![
            SolutionRecord::new(&straight_solution(), 1, 30.0),
            SolutionRecord::new(&straight_solution(), 2, 25.0),
        ];
        let json = solutions_to_json(&problem(), &records, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["board"], serde_json::json!([8, 6]));
        assert_eq!(value["points"].as_array().unwrap().len(), 4);
        assert_eq!(value["data"][1]["fitness"], 25.0);
    }

    #[test]
    fn test_history_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryWriter::with_chunk_size(&problem(), dir.path(), 3).unwrap();

        let config = SolverConfig::default()
            .with_population_size(10)
            .with_generation_limit(8)
            .with_seed(3);
        let mut solver = Solver::new(problem(), config).unwrap();
        solver.add_callback(history.clone());
        solver.run();

        // Generations 2..=8 give seven records: chunks of 3, 3 and 1.
        let files = history.finish().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["ga_history_00001.json", "ga_history_00002.json", "ga_history_00003.json"]
        );

        let first: serde_json::Value =
            serde_json::from_reader(File::open(&files[0]).unwrap()).unwrap();
        assert_eq!(first["board"], serde_json::json!([8, 6]));
        assert_eq!(first["data"].as_array().unwrap().len(), 3);
        assert_eq!(first["data"][0]["gen"], 2);
        assert!(first["data"][0].get("gAvg").is_some());
        assert!(first["data"][0].get("wtF").is_some());

        let rest: Vec<GenerationRecord> =
            serde_json::from_reader(File::open(&files[2]).unwrap()).unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].gen, 8);
        assert_eq!(rest[0].paths.len(), 2);
    }

    #[test]
    fn test_finish_without_records_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryWriter::new(&problem(), dir.path().join("nested")).unwrap();
        assert!(history.finish().unwrap().is_empty());
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_records_after_finish_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryWriter::with_chunk_size(&problem(), dir.path(), 1).unwrap();
        let late = history.clone();
        assert!(history.finish().unwrap().is_empty());

        late.record(GenerationRecord {
            gen: 1,
            fit: 0.0,
            paths: Vec::new(),
            g_avg: 0.0,
            wt_f: 0.0,
        });
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
