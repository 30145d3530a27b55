/*!
 * Tests for extractive summarization and summary cleanup
 */

use notesum::summary::{clean_summary, extractive_summarize, fallback_summary};

/// Test the three-sentence case with a long middle sentence
#[test]
fn test_extractiveSummarize_withThreeSentences_shouldKeepFirstMiddleAndLast() {
    let text = "First point of the day. The middle sentence is definitely long enough. Last one.";
    assert_eq!(
        extractive_summarize(text),
        "First point of the day. The middle sentence is definitely long enough. Last one"
    );
}

/// Test that a short middle sentence is skipped
#[test]
fn test_extractiveSummarize_withShortMiddleSentence_shouldSkipIt() {
    let text = "This is the opening sentence of the note. Short one. And this is how the note ends.";
    assert_eq!(
        extractive_summarize(text),
        "This is the opening sentence of the note. And this is how the note ends"
    );
}

/// Test that a repeated sentence is not emitted twice
#[test]
fn test_extractiveSummarize_withSameFirstAndLast_shouldEmitItOnce() {
    let text = "Remember to buy milk today! Remember to buy milk today!";
    assert_eq!(extractive_summarize(text), "Remember to buy milk today");
}

/// Test that terminator runs count as a single boundary
#[test]
fn test_extractiveSummarize_withTerminatorRuns_shouldSplitOnce() {
    let text = "What a surprising day it has been?!? Nobody expected the meeting to go so well...";
    assert_eq!(
        extractive_summarize(text),
        "What a surprising day it has been. Nobody expected the meeting to go so well"
    );
}

/// Test the run-on sentence compression with ten words exactly
#[test]
fn test_extractiveSummarize_withTenLongWords_shouldNotCompress() {
    let text = "aaaaaa bbbbbb cccccc dddddd eeeeee ffffff gggggg hhhhhh iiiiii jjjjjj";
    assert!(text.chars().count() > 50);
    assert_eq!(extractive_summarize(text), text);
}

/// Test that words are split on any whitespace run
#[test]
fn test_extractiveSummarize_withTabsAndNewlines_shouldSplitWords() {
    let text = "one\ttwo\nthree  four five six seven eight nine ten eleven twelve thirteen";
    assert_eq!(extractive_summarize(text), "one two three ... eleven twelve thirteen");
}

/// Test that the output never grows beyond the input for multi-sentence text
#[test]
fn test_extractiveSummarize_shouldNotBeLongerThanInput() {
    let texts = [
        "Alpha beta gamma delta epsilon. Zeta eta theta iota kappa lambda mu. Nu xi omicron pi rho.",
        "Un. Deux trois quatre cinq six sept huit neuf dix onze douze treize. Quatorze quinze.",
        "A very long sentence without any terminator that keeps going on and on forever and ever",
    ];

    for text in texts {
        assert!(extractive_summarize(text).chars().count() <= text.chars().count());
    }
}

/// Test that the fallback trims before summarizing
#[test]
fn test_fallbackSummary_shouldTrimInput() {
    assert_eq!(fallback_summary("  short note \n"), "short note");
    assert_eq!(fallback_summary("   "), "");
}

/// Test cleanup of the supported introductions
#[test]
fn test_cleanSummary_withKnownIntroductions_shouldStripThem() {
    let cases = [
        ("voici le résumé : le projet avance", "le projet avance"),
        ("Here's a summary: meeting moved", "meeting moved"),
        ("This is it:done", "done"),
        ("Resumen: todo bien", "todo bien"),
        ("Zusammenfassung:  alles gut", "alles gut"),
        ("The text mentions a deadline", "mentions a deadline"),
        ("Le texte parle du budget", "parle du budget"),
    ];

    for (input, expected) in cases {
        assert_eq!(clean_summary(input), expected, "input: {:?}", input);
    }
}

/// Test that cleanup leaves ordinary summaries alone apart from whitespace
#[test]
fn test_cleanSummary_withPlainSummary_shouldOnlyNormalizeWhitespace() {
    assert_eq!(clean_summary("  Budget   approved.\nShip\tit  "), "Budget approved. Ship it");
    assert_eq!(clean_summary(""), "");
}

/// Test idempotence on inputs with stacked introductions
#[test]
fn test_cleanSummary_shouldBeIdempotent() {
    let samples = [
        "Voici: Here is: the point",
        "The text   here is: value",
        "  ecco:   voici:  fin ",
        "Summary without prefix",
        "This is:",
    ];

    for sample in samples {
        let once = clean_summary(sample);
        assert_eq!(clean_summary(&once), once, "sample: {:?}", sample);
    }
}
