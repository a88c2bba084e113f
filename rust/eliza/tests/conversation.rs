use anyhow::Result;
use eliza::{Engine, EngineConfig, create_engine, doctor};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Play a conversation, checking every reply.
fn converse(engine: &mut Engine, exchanges: &[(&str, &str)]) {
    for (input, expected) in exchanges {
        assert_eq!(engine.respond(input), *expected, "reply to {input:?}");
    }
}

#[test]
fn test_greeting() -> Result<()> {
    let mut engine = create_engine()?;
    assert_eq!(engine.greeting(), "How do you do. Please tell me your problem");
    assert_eq!(engine.respond(""), engine.greeting());
    assert_eq!(engine.respond("  \t "), "How do you do. Please tell me your problem");
    Ok(())
}

#[test]
fn test_weizenbaum_transcript() -> Result<()> {
    let mut engine = create_engine()?;
    converse(
        &mut engine,
        &[
            ("Men are all alike.", "In what way"),
            (
                "They're always bugging us about something or other.",
                "Can you think of a specific example",
            ),
            (
                "Well, my boyfriend made me come here.",
                "Your boyfriend made you come here",
            ),
            (
                "He says I'm depressed much of the time.",
                "I am sorry to hear you are depressed",
            ),
            (
                "It's true. I am unhappy.",
                "Do you think coming here will help you not to be unhappy",
            ),
            (
                "I need some help, that much seems certain.",
                "What would it mean to you if you got some help",
            ),
            (
                "Perhaps I could learn to get along with my mother.",
                "Tell me more about your family",
            ),
            (
                "My mother takes care of me.",
                "Who else in your family takes care of you",
            ),
            ("My father.", "Your father"),
            ("You are like my father in some ways.", "What resemblance do you see"),
            (
                "You are not very aggressive but I think you don't want me to notice that.",
                "What makes you think I am not very aggressive but you think I don't want you to notice that",
            ),
            ("You don't argue with me.", "Why do you think I don't argue with you"),
            (
                "You are afraid of me.",
                "Does it please you to believe I am afraid of you",
            ),
            (
                "My father is afraid of everybody.",
                "What else comes to mind when you think of your father",
            ),
            (
                "Bullies.",
                "Does that have anything to do with the fact that your boyfriend made you come here",
            ),
        ],
    );
    Ok(())
}

#[test]
fn test_memory_surfaces_on_fourth_phase() -> Result<()> {
    let mut engine = create_engine()?;
    assert_eq!(engine.respond("My mother was kind"), "Tell me more about your family");
    assert_eq!(engine.pending_memories(), 1);

    assert_eq!(engine.variety(), 2);
    assert_eq!(engine.respond("The weather is nice"), "I am not sure I understand you fully");
    assert_eq!(engine.pending_memories(), 1);

    assert_eq!(engine.variety(), 3);
    assert_eq!(
        engine.respond("It rained today"),
        "Lets discuss further why your mother was kind"
    );
    assert_eq!(engine.pending_memories(), 0);
    Ok(())
}

#[test]
fn test_memory_slot_follows_last_word() -> Result<()> {
    let mut engine = create_engine()?;
    assert_eq!(engine.respond("My dog is nice"), "Your dog is nice");
    assert_eq!(engine.respond("It rained today"), "I am not sure I understand you fully");
    assert_eq!(engine.respond("It rained today"), "But your dog is nice");
    Ok(())
}

#[test]
fn test_catch_all_rotation() -> Result<()> {
    let mut engine = create_engine()?;
    let replies: Vec<String> = (0..5).map(|_| engine.respond("The weather is nice")).collect();
    assert_eq!(
        replies,
        vec![
            "I am not sure I understand you fully",
            "Please go on",
            "What does that suggest to you",
            "Do you feel strongly about discussing such things",
            "I am not sure I understand you fully",
        ]
    );
    Ok(())
}

#[test]
fn test_precedence_beats_input_order() -> Result<()> {
    let mut engine = create_engine()?;
    assert_eq!(engine.respond("My computer is broken"), "Do computers worry you");
    Ok(())
}

#[test]
fn test_reassemblies_rotate_through_links() -> Result<()> {
    let mut engine = create_engine()?;
    converse(
        &mut engine,
        &[
            ("Computers are scary", "Do computers worry you"),
            ("Computers are scary", "Why do you mention computers"),
            (
                "Machines are scary",
                "What do you think machines have to do with your problem",
            ),
        ],
    );
    Ok(())
}

#[test]
fn test_keyword_rules() -> Result<()> {
    let mut engine = create_engine()?;
    converse(
        &mut engine,
        &[
            ("I need a vacation", "What would it mean to you if you got a vacation"),
            ("I feel sad, my computer is broken", "Tell me more about such feelings"),
            ("You're mean to me", "What makes you think I am mean to you"),
            ("Remember my sister", "Tell me more about your family"),
            ("I dreamed about flying", "Really, about flying"),
        ],
    );
    Ok(())
}

#[test]
fn test_typographic_punctuation() -> Result<()> {
    let mut engine = create_engine()?;
    assert_eq!(
        engine.respond("You’re mean to me!"),
        "What makes you think I am mean to you"
    );
    Ok(())
}

#[test]
fn test_sessions_are_independent() -> Result<()> {
    let mut first = create_engine()?;
    let mut second = create_engine()?;

    assert_eq!(first.respond("Computers are scary"), "Do computers worry you");
    assert_eq!(first.respond("Computers are scary"), "Why do you mention computers");
    assert_eq!(second.respond("Computers are scary"), "Do computers worry you");
    Ok(())
}

#[test]
fn test_engine_with_config() -> Result<()> {
    let config = EngineConfig::new().with_max_redirects(0);
    let mut engine = Engine::with_config(doctor()?, config);

    // Every link is refused, so COMPUTERS never reaches COMPUTER.
    assert_eq!(
        engine.respond("Computers are scary"),
        "I am not sure I understand you fully"
    );
    Ok(())
}

#[test]
fn test_custom_script() -> Result<()> {
    let script = eliza_script::parse(
        "(GOOD DAY)
         (WEATHER ((0 WEATHER 0) (WEATHER 3 TODAY) (I PREFER SUN)))
         (NONE ((0) (TELL ME ABOUT THE WEATHER)))
         (MEMORY MY (0 = A) (0 = B) (0 = C) (0 = D))",
    )?;
    let mut engine = Engine::new(&script);

    assert_eq!(engine.greeting(), "Good day");
    assert_eq!(engine.respond("The weather is grey"), "Weather is grey today");
    assert_eq!(engine.respond("weather is grey"), "I prefer sun");
    assert_eq!(engine.respond("hello"), "Tell me about the weather");
    Ok(())
}

proptest! {
    #[test]
    fn doctor_always_replies(inputs in prop::collection::vec(any::<String>(), 1..12)) {
        let mut engine = create_engine().unwrap();
        for input in &inputs {
            prop_assert!(!engine.respond(input).is_empty(), "empty reply to {:?}", input);
        }
    }

    #[test]
    fn doctor_always_replies_to_words(
        inputs in prop::collection::vec("[a-zA-Z',.?! ]{0,60}", 1..12),
    ) {
        let mut engine = create_engine().unwrap();
        for input in &inputs {
            prop_assert!(!engine.respond(input).is_empty(), "empty reply to {:?}", input);
        }
    }
}
