use thiserror::Error;

use crate::dialogue::DialogueError;
use crate::engine::EngineError;
use crate::model::QuestionError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Dialogue(#[from] DialogueError),
}
