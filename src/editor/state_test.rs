#[cfg(test)]
mod tests {
    use super::super::state::*;
    use super::super::translate_key;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_key_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        }
    }

    fn create_key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: crossterm::event::KeyEventKind::Press,
            state: crossterm::event::KeyEventState::empty(),
        }
    }

    fn type_word(state: &mut EditorState, word: &str) {
        for c in word.chars() {
            let step = state.apply(EditorEvent::Char(c));
            assert_eq!(step, EditorStep::Editing);
        }
    }

    #[test]
    fn test_buffer_starts_with_marker() {
        let state = EditorState::new();
        assert_eq!(state.text(), "#");
    }

    #[test]
    fn test_character_input_appends() {
        let mut state = EditorState::new();
        type_word(&mut state, "climate");
        assert_eq!(state.text(), "#climate");
    }

    #[test]
    fn test_space_appends_a_literal_space() {
        let mut state = EditorState::new();
        type_word(&mut state, "rust");
        state.apply(EditorEvent::Space);
        type_word(&mut state, "lang");
        assert_eq!(state.text(), "#rust lang");
    }

    #[test]
    fn test_backspace_removes_last_character() {
        let mut state = EditorState::new();
        type_word(&mut state, "ab");
        state.apply(EditorEvent::Backspace);
        assert_eq!(state.text(), "#a");
    }

    #[test]
    fn test_backspace_never_erases_the_marker() {
        let mut state = EditorState::new();
        for _ in 0..5 {
            let step = state.apply(EditorEvent::Backspace);
            assert_eq!(step, EditorStep::Editing);
        }
        assert_eq!(state.text(), "#");

        // Still editable afterwards
        type_word(&mut state, "x");
        assert_eq!(state.text(), "#x");
    }

    #[test]
    fn test_enter_submits_the_current_buffer() {
        let mut state = EditorState::new();
        type_word(&mut state, "news");
        let step = state.apply(EditorEvent::Enter);
        assert_eq!(step, EditorStep::Submitted("#news".to_string()));
    }

    #[test]
    fn test_enter_on_a_fresh_buffer_submits_the_bare_marker() {
        let mut state = EditorState::new();
        let step = state.apply(EditorEvent::Enter);
        assert_eq!(step, EditorStep::Submitted("#".to_string()));
    }

    #[test]
    fn test_escape_aborts() {
        let mut state = EditorState::new();
        type_word(&mut state, "discarded");
        let step = state.apply(EditorEvent::Escape);
        assert_eq!(step, EditorStep::Aborted);
    }

    #[test]
    fn test_translate_plain_keys() {
        assert_eq!(
            translate_key(create_key_event(KeyCode::Char('a'))),
            Some(EditorEvent::Char('a'))
        );
        assert_eq!(
            translate_key(create_key_event(KeyCode::Char(' '))),
            Some(EditorEvent::Space)
        );
        assert_eq!(
            translate_key(create_key_event(KeyCode::Backspace)),
            Some(EditorEvent::Backspace)
        );
        assert_eq!(
            translate_key(create_key_event(KeyCode::Enter)),
            Some(EditorEvent::Enter)
        );
        assert_eq!(
            translate_key(create_key_event(KeyCode::Esc)),
            Some(EditorEvent::Escape)
        );
    }

    #[test]
    fn test_translate_keeps_shifted_characters() {
        let event = create_key_event_with_modifiers(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(translate_key(event), Some(EditorEvent::Char('A')));
    }

    #[test]
    fn test_translate_ignores_control_and_alt_chords() {
        let ctrl = create_key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate_key(ctrl), None);

        let alt = create_key_event_with_modifiers(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(translate_key(alt), None);
    }

    #[test]
    fn test_translate_ignores_unbound_keys() {
        assert_eq!(translate_key(create_key_event(KeyCode::Tab)), None);
        assert_eq!(translate_key(create_key_event(KeyCode::Left)), None);
        assert_eq!(translate_key(create_key_event(KeyCode::F(1))), None);
    }
}
