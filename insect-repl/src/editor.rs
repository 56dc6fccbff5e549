//! Line editing on a terminal

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, EditMode, Editor};
use tracing::{debug, warn};

use crate::completer::Vocabulary;
use crate::config::ReplConfig;
use crate::error::ReplResult;
use crate::highlighter::ReplHelper;
use crate::history::HistoryManager;
use crate::source::LineSource;

/// Keyboard input through rustyline, with completion and persistent history
pub struct EditorSource {
    editor: Editor<ReplHelper, DefaultHistory>,
    prompt: String,
    history: HistoryManager,
}

impl EditorSource {
    pub fn new(config: &ReplConfig) -> ReplResult<Self> {
        let rl_config = Config::builder()
            .history_ignore_space(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .max_history_size(config.max_history)?
            .build();

        let mut editor = Editor::with_config(rl_config)?;
        editor.set_helper(Some(ReplHelper::new()));

        let history = HistoryManager::new(config.history_file.clone(), config.max_history);
        match history.load() {
            Ok(entries) => {
                debug!(entries = entries.len(), "loaded history");
                for entry in entries {
                    editor.add_history_entry(entry)?;
                }
            }
            Err(e) => warn!(error = %e, "could not load history"),
        }

        Ok(Self {
            editor,
            prompt: config.prompt.clone(),
            history,
        })
    }
}

impl LineSource for EditorSource {
    fn next_line(&mut self) -> ReplResult<Option<String>> {
        loop {
            match self.editor.readline(&self.prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.as_str())?;
                        if let Err(e) = self.history.append(&line) {
                            warn!(error = %e, "could not save history");
                        }
                    }
                    return Ok(Some(line));
                }
                // Ctrl-C abandons the current line only
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn refresh_completions(&mut self, vocabulary: Vocabulary) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.set_vocabulary(vocabulary);
        }
    }
}
