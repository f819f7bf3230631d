/// Errors that know how loudly they should be reported.
///
/// Most failures in a collection pass are expected (a controller file that does
/// not exist, a cgroup removed mid-walk), so the log level is a property of the
/// error rather than of the call site.
pub trait Severity {
    fn level(&self) -> log::Level;
}

pub trait ResultOkLogExt<T, E> {
    fn ok_log(self) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Severity,
{
    fn ok_log(self) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::log!(err.level(), "{err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    impl Severity for Boom {
        fn level(&self) -> log::Level {
            log::Level::Debug
        }
    }

    #[test]
    fn test_ok_log_passes_values_through() {
        let res: Result<u8, Boom> = Ok(7);
        assert_eq!(res.ok_log(), Some(7));
    }

    #[test]
    fn test_ok_log_turns_errors_into_none() {
        let res: Result<u8, Boom> = Err(Boom);
        assert_eq!(res.ok_log(), None);
    }
}
