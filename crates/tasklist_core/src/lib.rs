pub mod config;
pub mod error;
pub mod model;
pub mod state;
pub mod storage;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::{Filter, Task, TaskId};

    #[test]
    fn task_has_required_fields() {
        let task = Task {
            id: TaskId::Number(1),
            text: "demo".to_string(),
            completed: false,
        };

        assert_eq!(task.id, TaskId::Number(1));
        assert_eq!(task.text, "demo");
        assert!(!task.completed);
        assert!(Filter::Pending.matches(&task));
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("missing text");
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.to_string(), "invalid_input - missing text");
    }

    #[test]
    fn io_errors_convert() {
        let err: AppError = std::io::Error::other("disk gone").into();
        assert_eq!(err.code(), "io_error");
        assert_eq!(err.message(), "disk gone");
    }
}
