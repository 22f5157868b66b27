//! Parsing of typed input lines into playback commands.

use syncwatch_server::{domain::playback_seconds, infrastructure::dto::websocket::ClientCommand};

use crate::error::ClientError;

/// What a typed line asks the client to do
#[derive(Debug, Clone, PartialEq)]
pub enum InputCommand {
    /// Send a playback command to the room
    Send(ClientCommand),
    /// Show the locally projected playback state
    Status,
    Help,
    Quit,
}

/// Parse one input line.
///
/// Accepted forms: `video <url>`, `play [seconds]`, `pause [seconds]`,
/// `seek <seconds>`, `status`, `help`, `quit`.
pub fn parse_input(line: &str) -> Result<InputCommand, ClientError> {
    let mut parts = line.split_whitespace();
    let Some(keyword) = parts.next() else {
        return Err(ClientError::InvalidCommand("empty input".to_string()));
    };
    let argument = parts.next();
    if parts.next().is_some() {
        return Err(ClientError::InvalidCommand(format!(
            "too many arguments for '{}'",
            keyword
        )));
    }

    let command = match keyword.to_ascii_lowercase().as_str() {
        "video" => {
            let url = argument.ok_or_else(|| missing_argument("video", "<url>"))?;
            ClientCommand::VideoUpdate {
                video_url: Some(url.to_string()),
            }
        }
        "play" => ClientCommand::Play {
            current_time: argument.map(parse_seconds).transpose()?,
        },
        "pause" => ClientCommand::Pause {
            current_time: argument.map(parse_seconds).transpose()?,
        },
        "seek" => {
            let seconds = argument.ok_or_else(|| missing_argument("seek", "<seconds>"))?;
            ClientCommand::Seek {
                current_time: Some(parse_seconds(seconds)?),
            }
        }
        "status" => return Ok(InputCommand::Status),
        "help" | "?" => return Ok(InputCommand::Help),
        "quit" | "exit" => return Ok(InputCommand::Quit),
        other => {
            return Err(ClientError::InvalidCommand(format!(
                "unknown command '{}' (type 'help')",
                other
            )));
        }
    };

    Ok(InputCommand::Send(command))
}

fn missing_argument(keyword: &str, usage: &str) -> ClientError {
    ClientError::InvalidCommand(format!("usage: {} {}", keyword, usage))
}

fn parse_seconds(text: &str) -> Result<f64, ClientError> {
    text.parse::<f64>()
        .ok()
        .and_then(playback_seconds)
        .ok_or_else(|| {
            ClientError::InvalidCommand(format!("'{}' is not a valid position in seconds", text))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video() {
        // テスト項目: video コマンドが videoUpdate になる
        // given (前提条件):
        let line = "video https://x/video.mp4";

        // when (操作):
        let result = parse_input(line);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(InputCommand::Send(ClientCommand::VideoUpdate {
                video_url: Some("https://x/video.mp4".to_string())
            }))
        );
    }

    #[test]
    fn test_parse_play_and_pause_with_optional_time() {
        // テスト項目: play / pause は秒数の省略を許す
        assert_eq!(
            parse_input("play"),
            Ok(InputCommand::Send(ClientCommand::Play { current_time: None }))
        );
        assert_eq!(
            parse_input("PAUSE 12.5"),
            Ok(InputCommand::Send(ClientCommand::Pause {
                current_time: Some(12.5)
            }))
        );
        assert_eq!(
            parse_input("  play   0  "),
            Ok(InputCommand::Send(ClientCommand::Play {
                current_time: Some(0.0)
            }))
        );
    }

    #[test]
    fn test_parse_seek_requires_valid_seconds() {
        // テスト項目: seek は 0 以上、上限以下の有限な秒数を必須とする
        assert_eq!(
            parse_input("seek 90"),
            Ok(InputCommand::Send(ClientCommand::Seek {
                current_time: Some(90.0)
            }))
        );
        assert!(parse_input("seek").is_err());
        assert!(parse_input("seek -1").is_err());
        assert!(parse_input("seek NaN").is_err());
        assert!(parse_input("seek soon").is_err());
        assert!(parse_input("seek 1e16").is_err());
    }

    #[test]
    fn test_parse_local_commands() {
        // テスト項目: サーバーに送らないコマンドを解析できる
        assert_eq!(parse_input("status"), Ok(InputCommand::Status));
        assert_eq!(parse_input("help"), Ok(InputCommand::Help));
        assert_eq!(parse_input("quit"), Ok(InputCommand::Quit));
        assert_eq!(parse_input("exit"), Ok(InputCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_unknown_and_extra_arguments() {
        // テスト項目: 未知のコマンドや余分な引数はエラーになる
        assert!(matches!(
            parse_input("rewind"),
            Err(ClientError::InvalidCommand(_))
        ));
        assert!(matches!(
            parse_input("video a b"),
            Err(ClientError::InvalidCommand(_))
        ));
        assert!(matches!(parse_input("   "), Err(ClientError::InvalidCommand(_))));
    }
}
