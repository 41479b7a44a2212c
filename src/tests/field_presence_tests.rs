//! Field-presence validation over the captured sample corpus.
//!
//! One check per API operation: load the fixture, decode it against the
//! operation's response schema, and assert every field outside the
//! operation's exclusion list came back populated.

use crate::corpus::Corpus;
use crate::errors::{CodecError, FixtureError};
use crate::validate::Exclusions;

fn corpus() -> Corpus {
    Corpus::new(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"))
}

fn channels_create_exclusions() -> Exclusions {
    Exclusions::names([
        "numMembers",
        "unreadCount",
        "unreadCountDisplay",
        "lastRead",
        "user",
        "priority",
        "locale",
    ])
}

fn chat_post_message_exclusions() -> Exclusions {
    Exclusions::names([
        "subtype",
        "botId",
        "threadTs",
        "parentUserId",
        "replyCount",
        "replyUsersCount",
        "latestReply",
        "replyUsers",
        "isStarred",
        "reactions",
        "edited",
        "permalink",
        "botProfile",
        "appId",
        "icons",
        "username",
        "emoji",
    ])
}

fn users_list_exclusions() -> Exclusions {
    Exclusions::names(["skype", "imageOriginal"])
        .pattern(r"^image\d+$")
        .expect("valid pattern")
}

#[test]
fn api_test() {
    corpus()
        .check("api.test", &Exclusions::names(["error", "warning"]))
        .unwrap();
}

#[test]
fn auth_test() {
    corpus().check("auth.test", &Exclusions::none()).unwrap();
}

#[test]
fn channels_create() {
    corpus()
        .check("channels.create", &channels_create_exclusions())
        .unwrap();
}

#[test]
fn channels_create_reports_an_uncovered_field() {
    // Same sample, but without the `numMembers` exclusion: the one field
    // that is genuinely unset must surface, with its full path.
    let exclusions = Exclusions::names([
        "unreadCount",
        "unreadCountDisplay",
        "lastRead",
        "user",
        "priority",
        "locale",
    ]);
    let report = corpus().verify("channels.create", &exclusions).unwrap();
    let paths: Vec<String> = report.violations().iter().map(ToString::to_string).collect();
    assert_eq!(paths, ["channel.numMembers"]);
}

#[test]
fn channels_list() {
    let exclusions = Exclusions::names([
        "unreadCount",
        "unreadCountDisplay",
        "lastRead",
        "user",
        "priority",
        "locale",
    ]);
    corpus().check("channels.list", &exclusions).unwrap();
}

#[test]
fn conversations_info() {
    corpus()
        .check("conversations.info", &Exclusions::none())
        .unwrap();
}

#[test]
fn chat_post_message() {
    corpus()
        .check("chat.postMessage", &chat_post_message_exclusions())
        .unwrap();
}

#[test]
fn users_list() {
    corpus().check("users.list", &users_list_exclusions()).unwrap();
}

#[test]
fn rtm_typing() {
    corpus().check("rtm.typing", &Exclusions::none()).unwrap();
}

#[test]
fn missing_sample_is_not_a_validation_failure() {
    let empty = Corpus::new(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/api"));
    let err = empty.decode("auth.test").unwrap_err();
    assert!(matches!(
        err,
        CodecError::Fixture(FixtureError::NotFound { .. })
    ));
}

#[test]
fn full_corpus_run_reports_per_operation() {
    let checks = [
        ("api.test", Exclusions::names(["error", "warning"])),
        ("auth.test", Exclusions::none()),
        ("channels.create", channels_create_exclusions()),
        (
            "channels.list",
            Exclusions::names([
                "unreadCount",
                "unreadCountDisplay",
                "lastRead",
                "user",
                "priority",
                "locale",
            ]),
        ),
        ("conversations.info", Exclusions::none()),
        ("chat.postMessage", chat_post_message_exclusions()),
        ("users.list", users_list_exclusions()),
        ("rtm.typing", Exclusions::none()),
    ];
    let report = corpus().run(&checks);
    assert!(report.is_ok(), "failures: {:?}", report.failures().collect::<Vec<_>>());
    assert_eq!(report.passed(), checks.len());
    assert_eq!(report.failed(), 0);
}
