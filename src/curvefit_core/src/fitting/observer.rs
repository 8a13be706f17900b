// BSD 3-Clause License
//
// Copyright (c) 2026, Dar Dahlen
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets};

/// Snapshot of the solver state at the end of an iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationState {
    /// Iteration number, starting at 1.
    pub iteration: usize,

    /// Parameters after applying this iteration's update.
    pub params: Vec<f64>,

    /// Update which was applied to the parameters.
    pub delta: Vec<f64>,

    /// Relative change of each parameter, `delta / params`.
    pub relative_change: Vec<f64>,

    /// Sum of squared residuals at the parameters this iteration started from.
    pub sum_squares: f64,
}

/// Receives the solver state after every iteration.
///
/// Observers are a side channel only, they cannot alter the course of a fit.
pub trait Observer {
    /// Called once per iteration after the parameters are updated.
    fn on_iteration(&mut self, state: &IterationState);

    /// Called once when the fit stops, regardless of outcome.
    fn on_finish(&mut self) {}
}

/// Emit a line through the logger if one is listening, otherwise to stdout.
fn emit_line(line: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{line}");
    } else {
        println!("{line}");
    }
}

/// Logs a single debug line for each iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_iteration(&mut self, state: &IterationState) {
        log::debug!(
            "iteration {}: Sr={:.6e} params={:?} change={:?}",
            state.iteration,
            state.sum_squares,
            state.params,
            state.relative_change
        );
    }
}

/// Collects every iteration and prints them as a table when the fit finishes.
#[derive(Debug, Default)]
pub struct TraceObserver {
    names: Vec<String>,
    rows: Vec<IterationState>,
}

impl TraceObserver {
    /// Construct a new observer, using the names for the parameter columns.
    #[must_use]
    pub fn new(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| (*n).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Iterations recorded so far and not yet printed.
    #[must_use]
    pub fn rows(&self) -> &[IterationState] {
        &self.rows
    }

    /// Render the recorded iterations as a table.
    #[must_use]
    pub fn render(&self) -> Table {
        let n_params = self.rows.first().map_or(self.names.len(), |r| r.params.len());
        let name = |idx: usize| {
            self.names
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("p{idx}"))
        };

        let mut table = Table::new();
        let _ = table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        let mut header = vec![
            Cell::new("iter").set_alignment(CellAlignment::Right),
            Cell::new("Sr").set_alignment(CellAlignment::Right),
        ];
        header.extend((0..n_params).map(|idx| Cell::new(name(idx))));
        header.extend((0..n_params).map(|idx| Cell::new(format!("E[{}]", name(idx)))));
        let _ = table.set_header(header);

        for row in &self.rows {
            let mut cells = vec![
                Cell::new(row.iteration).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.4e}", row.sum_squares)).set_alignment(CellAlignment::Right),
            ];
            cells.extend(
                row.params
                    .iter()
                    .map(|p| Cell::new(format!("{p:.6}")).set_alignment(CellAlignment::Right)),
            );
            cells.extend(
                row.relative_change
                    .iter()
                    .map(|e| Cell::new(format!("{e:.2e}")).set_alignment(CellAlignment::Right)),
            );
            let _ = table.add_row(cells);
        }
        table
    }
}

impl Observer for TraceObserver {
    fn on_iteration(&mut self, state: &IterationState) {
        self.rows.push(state.clone());
    }

    fn on_finish(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        for line in self.render().to_string().lines() {
            emit_line(line);
        }
        self.rows.clear();
    }
}
