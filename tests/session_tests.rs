use chessgate::chess::{LegalityMode, MoveRejection, MoveRequest};
use chessgate::gate::{
    Credentials, GateError, SequenceDetector, SequenceProgress, DEFAULT_UNLOCK_SEQUENCE,
};
use chessgate::session::GameSession;

fn req(s: &str) -> MoveRequest {
    s.parse().unwrap()
}

fn play_unlock_sequence(session: &mut GameSession) {
    for step in DEFAULT_UNLOCK_SEQUENCE {
        session.submit_move(req(step)).unwrap();
    }
}

fn message_texts(session: &GameSession) -> Vec<String> {
    session.messages().iter().map(|m| m.text.clone()).collect()
}

#[cfg(test)]
mod detector_tests {
    use super::*;

    #[test]
    fn test_full_sequence_completes_and_rewinds() {
        let mut detector = SequenceDetector::default();
        assert_eq!(detector.len(), 6);

        for (i, step) in DEFAULT_UNLOCK_SEQUENCE.iter().take(5).enumerate() {
            assert_eq!(
                detector.observe(step),
                SequenceProgress::Advanced {
                    matched: i + 1,
                    total: 6
                }
            );
        }
        assert_eq!(detector.observe("g8-f6"), SequenceProgress::Completed);
        assert_eq!(detector.matched(), 0);
    }

    #[test]
    fn test_mismatch_rewinds_without_retesting() {
        let mut detector = SequenceDetector::default();
        detector.observe("e2-e4");
        detector.observe("e7-e5");
        assert_eq!(detector.observe("d2-d4"), SequenceProgress::Broken);
        assert_eq!(detector.matched(), 0);

        // The first step itself breaks the sequence when it arrives out of turn
        detector.observe("e2-e4");
        assert_eq!(detector.observe("e2-e4"), SequenceProgress::Broken);
        assert_eq!(detector.matched(), 0);
    }

    #[test]
    fn test_custom_single_step_sequence() {
        let mut detector = SequenceDetector::parse(&["a2a3".to_string()]).unwrap();
        assert_eq!(detector.observe("a2-a3"), SequenceProgress::Completed);
    }
}

#[cfg(test)]
mod session_flow_tests {
    use super::*;

    #[test]
    fn test_unlock_sequence_opens_gate() {
        let mut session = GameSession::default();
        assert!(!session.is_unlocked());

        for (i, step) in DEFAULT_UNLOCK_SEQUENCE.iter().enumerate() {
            let played = session.submit_move(req(step)).unwrap();
            assert_eq!(played.unlocked, i == 5);
        }

        assert!(session.is_unlocked());
        let texts = message_texts(&session);
        assert_eq!(
            texts,
            vec![
                "Authentication sequence progress: 2/6",
                "Authentication sequence progress: 3/6",
                "Authentication sequence progress: 4/6",
                "Authentication sequence progress: 5/6",
                "Authentication sequence progress: 6/6",
                "Authentication required! Use the special credentials to access the secure drive.",
            ]
        );
    }

    #[test]
    fn test_rejected_move_does_not_touch_sequence() {
        let mut session = GameSession::default();
        session.submit_move(req("e2-e4")).unwrap();

        let result = session.submit_move(req("e4-e5"));
        assert!(matches!(result, Err(MoveRejection::WrongTurn { .. })));
        assert_eq!(session.detector().matched(), 1);

        session.submit_move(req("e7-e5")).unwrap();
        assert_eq!(session.detector().matched(), 2);
    }

    #[test]
    fn test_reset_rewinds_sequence_and_posts_message() {
        let mut session = GameSession::default();
        session.submit_move(req("e2-e4")).unwrap();
        session.submit_move(req("e7-e5")).unwrap();
        session.drain_messages();

        session.reset();

        assert_eq!(session.detector().matched(), 0);
        assert!(session.game().history().is_empty());
        assert_eq!(message_texts(&session), vec!["Board has been reset"]);
    }

    #[test]
    fn test_history_lines_are_numbered_by_full_move() {
        let mut session = GameSession::default();
        for step in ["e2e4", "e7e5", "g1f3"] {
            session.submit_move(req(step)).unwrap();
        }
        assert_eq!(
            session.move_history_lines(),
            vec!["1. e2e4", "1. e7e5", "2. Ng1f3"]
        );
    }

    #[test]
    fn test_strict_session_rejects_illegal_moves() {
        let mut session = GameSession::new(
            LegalityMode::Strict,
            SequenceDetector::default(),
            Credentials::default(),
        );
        assert!(matches!(
            session.submit_move(req("e2-e5")),
            Err(MoveRejection::Illegal { .. })
        ));
        play_unlock_sequence(&mut session);
        assert!(session.is_unlocked());
    }
}

#[cfg(test)]
mod login_tests {
    use super::*;

    #[test]
    fn test_login_requires_unlock() {
        let mut session = GameSession::default();
        assert_eq!(
            session.login("testuser", "12345678"),
            Err(GateError::Locked)
        );
        assert!(session.token().is_none());
    }

    #[test]
    fn test_login_with_wrong_credentials() {
        let mut session = GameSession::default();
        play_unlock_sequence(&mut session);
        assert_eq!(
            session.login("testuser", "wrong"),
            Err(GateError::InvalidCredentials)
        );
        assert!(session.username().is_none());
    }

    #[test]
    fn test_login_success_issues_token() {
        let mut session = GameSession::default();
        play_unlock_sequence(&mut session);
        session.drain_messages();

        let token = session.login("testuser", "12345678").unwrap();

        assert_eq!(session.token(), Some(&token));
        assert_eq!(session.username(), Some("testuser"));
        assert_eq!(
            message_texts(&session),
            vec!["Welcome, testuser! You are now logged in."]
        );
    }

    #[test]
    fn test_custom_credentials() {
        let mut session = GameSession::new(
            LegalityMode::Permissive,
            SequenceDetector::parse(&["d2d4".to_string()]).unwrap(),
            Credentials::new("alice", "s3cret"),
        );
        session.submit_move(req("d2d4")).unwrap();
        assert!(session.login("testuser", "12345678").is_err());
        assert!(session.login("alice", "s3cret").is_ok());
    }

    #[test]
    fn test_unlock_survives_reset() {
        let mut session = GameSession::default();
        play_unlock_sequence(&mut session);
        session.reset();
        assert!(session.is_unlocked());
        assert!(session.login("testuser", "12345678").is_ok());
    }
}
