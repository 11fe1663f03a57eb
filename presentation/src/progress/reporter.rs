//! Progress reporting for brainstorming sessions

use brainstorm_application::ProgressObserver;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports session progress with a live progress bar
pub struct ProgressReporter {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for ProgressReporter {
    fn on_session_start(&self, total_steps: usize, cycles: usize, ideas: usize) {
        let pb = self.multi.add(ProgressBar::new(total_steps as u64));
        pb.set_style(Self::bar_style());
        pb.set_prefix("Brainstorming");
        pb.set_message(format!("{} cycles, {} ideas", cycles, ideas));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        *self.bar.lock().unwrap() = Some(pb);
    }

    fn on_phase_change(&self, label: &str, _completed_steps: usize, _total_steps: usize) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_message(label.to_string());
        }
    }

    fn on_step_complete(&self, completed_steps: usize, _total_steps: usize) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_position(completed_steps as u64);
        }
    }

    fn on_total_revised(&self, total_steps: usize) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.set_length(total_steps as u64);
        }
    }

    fn on_idea_start(&self, rank: usize, preview: &str) {
        if let Some(pb) = self.bar.lock().unwrap().as_ref() {
            pb.println(format!(
                "{} Idea {}: {}",
                "->".cyan(),
                rank,
                truncate(preview, 60).bold()
            ));
        }
    }

    fn on_finished(&self, completed_steps: usize, total_steps: usize) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            if completed_steps >= total_steps {
                pb.finish_with_message("done!".green().to_string());
            } else {
                pb.abandon_with_message("aborted".red().to_string());
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressObserver for SimpleProgress {
    fn on_session_start(&self, total_steps: usize, cycles: usize, ideas: usize) {
        println!(
            "{} {} steps ({} cycles, {} ideas)",
            "->".cyan(),
            total_steps,
            cycles,
            ideas
        );
    }

    fn on_phase_change(&self, label: &str, completed_steps: usize, total_steps: usize) {
        println!("  [{}/{}] {}", completed_steps, total_steps, label);
    }

    fn on_idea_start(&self, rank: usize, preview: &str) {
        println!("{} Idea {}: {}", "->".cyan(), rank, truncate(preview, 60));
    }

    fn on_finished(&self, completed_steps: usize, total_steps: usize) {
        if completed_steps >= total_steps {
            println!("{} done", "v".green());
        } else {
            println!("{} aborted at {}/{}", "x".red(), completed_steps, total_steps);
        }
    }
}

/// Truncate a string to a maximum length
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
