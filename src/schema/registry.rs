//! Process-wide schema registry.
//!
//! Declares the wire shapes of the Slack domain (messages, attachments,
//! Block Kit blocks, channels, conversations, users, RTM events) and the
//! response envelope for each supported API operation. The registry is
//! built once, on first use, and is immutable for the process lifetime.
//!
//! The shapes here are a hand-maintained sample of the full generated
//! surface: enough depth (message → attachment → block → text element) to
//! exercise every codec path, without carrying the thousands of
//! near-identical envelopes the upstream API defines.

use super::{FieldType, Schema, UnionType};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of schemas and operation → response-schema bindings
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<Schema>>,
    operations: HashMap<String, String>,
}

impl SchemaRegistry {
    fn new() -> Self {
        Self::default()
    }

    fn register(&mut self, schema: Arc<Schema>) {
        let prev = self.schemas.insert(schema.name().to_string(), schema);
        debug_assert!(prev.is_none(), "schema registered twice");
    }

    fn bind_operation(&mut self, operation: &str, schema: &str) {
        debug_assert!(
            self.schemas.contains_key(schema),
            "operation `{operation}` bound to unregistered schema `{schema}`"
        );
        self.operations
            .insert(operation.to_string(), schema.to_string());
    }

    /// Look up a schema by name
    pub fn schema(&self, name: &str) -> Option<&Arc<Schema>> {
        self.schemas.get(name)
    }

    /// Look up the response schema for an API operation
    pub fn operation_schema(&self, operation: &str) -> Option<&Arc<Schema>> {
        self.operations
            .get(operation)
            .and_then(|name| self.schemas.get(name))
    }

    /// Names of all bound operations
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

/// The global registry
pub fn registry() -> &'static SchemaRegistry {
    static REGISTRY: Lazy<SchemaRegistry> = Lazy::new(build);
    &REGISTRY
}

/// Block Kit block union: `type` selects the block shape, with a fallback
/// for block types this client does not yet model
pub fn block_union() -> UnionType {
    UnionType::new("type")
        .variant("section", "sectionBlock")
        .variant("divider", "dividerBlock")
        .variant("image", "imageBlock")
        .with_fallback()
}

/// RTM event union: `type` selects the event shape, with a fallback for
/// event types this client does not yet model
pub fn rtm_event_union() -> UnionType {
    UnionType::new("type")
        .variant("typing", "typingEvent")
        .variant("hello", "helloEvent")
        .variant("message", "message")
        .with_fallback()
}

fn build() -> SchemaRegistry {
    let mut reg = SchemaRegistry::new();

    // Block Kit
    reg.register(
        Schema::builder("textObject")
            .field("type", FieldType::String)
            .field("text", FieldType::String)
            .field("emoji", FieldType::Bool)
            .field("verbatim", FieldType::Bool)
            .build(),
    );
    reg.register(
        Schema::builder("sectionBlock")
            .fixed("type", "section")
            .field("blockId", FieldType::String)
            .field("text", FieldType::record("textObject"))
            .field("fields", FieldType::array(FieldType::record("textObject")))
            .build(),
    );
    reg.register(
        Schema::builder("dividerBlock")
            .fixed("type", "divider")
            .field("blockId", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("imageBlock")
            .fixed("type", "image")
            .field("blockId", FieldType::String)
            .field("imageUrl", FieldType::String)
            .field("altText", FieldType::String)
            .field("title", FieldType::record("textObject"))
            .build(),
    );

    // Message substructures
    reg.register(
        Schema::builder("attachmentField")
            .field("title", FieldType::String)
            .field("value", FieldType::String)
            .field("short", FieldType::Bool)
            .build(),
    );
    reg.register(
        Schema::builder("attachment")
            .field("id", FieldType::Int)
            .field("fallback", FieldType::String)
            .field("color", FieldType::String)
            .field("pretext", FieldType::String)
            .field("authorName", FieldType::String)
            .field("authorLink", FieldType::String)
            .field("authorIcon", FieldType::String)
            .field("title", FieldType::String)
            .field("titleLink", FieldType::String)
            .field("text", FieldType::String)
            .field("fields", FieldType::array(FieldType::record("attachmentField")))
            .field("imageUrl", FieldType::String)
            .field("thumbUrl", FieldType::String)
            .field("footer", FieldType::String)
            .field("footerIcon", FieldType::String)
            .field("ts", FieldType::Int)
            .field("mrkdwnIn", FieldType::array(FieldType::String))
            .field("callbackId", FieldType::String)
            .field("blocks", FieldType::array(FieldType::Union(block_union())))
            .build(),
    );
    reg.register(
        Schema::builder("reaction")
            .field("name", FieldType::String)
            .field("users", FieldType::array(FieldType::String))
            .field("count", FieldType::Int)
            .build(),
    );
    reg.register(
        Schema::builder("messageEdited")
            .field("user", FieldType::String)
            .field("ts", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("messageIcons")
            .field("emoji", FieldType::String)
            .field("image64", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("botIcons")
            .field("image36", FieldType::String)
            .field("image48", FieldType::String)
            .field("image72", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("botProfile")
            .field("id", FieldType::String)
            .field("appId", FieldType::String)
            .field("name", FieldType::String)
            .field("icons", FieldType::record("botIcons"))
            .field("deleted", FieldType::Bool)
            .field("teamId", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("message")
            .field("type", FieldType::String)
            .field("subtype", FieldType::String)
            .field("text", FieldType::String)
            .field("user", FieldType::String)
            .field("botId", FieldType::String)
            .field("ts", FieldType::String)
            .field("threadTs", FieldType::String)
            .field("parentUserId", FieldType::String)
            .field("replyCount", FieldType::Int)
            .field("replyUsersCount", FieldType::Int)
            .field("latestReply", FieldType::String)
            .field("replyUsers", FieldType::array(FieldType::String))
            .field("isStarred", FieldType::Bool)
            .field("reactions", FieldType::array(FieldType::record("reaction")))
            .field("attachments", FieldType::array(FieldType::record("attachment")))
            .field("blocks", FieldType::array(FieldType::Union(block_union())))
            .field("edited", FieldType::record("messageEdited"))
            .field("permalink", FieldType::String)
            .field("botProfile", FieldType::record("botProfile"))
            .field("appId", FieldType::String)
            .field("icons", FieldType::record("messageIcons"))
            .field("username", FieldType::String)
            .field("team", FieldType::String)
            .field("channel", FieldType::String)
            .build(),
    );

    // Channels and conversations
    reg.register(
        Schema::builder("channelTopic")
            .field("value", FieldType::String)
            .field("creator", FieldType::String)
            .field("lastSet", FieldType::Int)
            .build(),
    );
    reg.register(
        Schema::builder("channelPurpose")
            .field("value", FieldType::String)
            .field("creator", FieldType::String)
            .field("lastSet", FieldType::Int)
            .build(),
    );
    reg.register(
        Schema::builder("channel")
            .field("id", FieldType::String)
            .field("name", FieldType::String)
            .field("nameNormalized", FieldType::String)
            .field("isChannel", FieldType::Bool)
            .field("isGroup", FieldType::Bool)
            .field("isIm", FieldType::Bool)
            .field("isMpim", FieldType::Bool)
            .field("isPrivate", FieldType::Bool)
            .field("isArchived", FieldType::Bool)
            .field("isGeneral", FieldType::Bool)
            .field("isShared", FieldType::Bool)
            .field("isOrgShared", FieldType::Bool)
            .field("isMember", FieldType::Bool)
            .field("creator", FieldType::String)
            .field("created", FieldType::Int)
            .field("unreadCount", FieldType::Int)
            .field("unreadCountDisplay", FieldType::Int)
            .field("lastRead", FieldType::String)
            .field("topic", FieldType::record("channelTopic"))
            .field("purpose", FieldType::record("channelPurpose"))
            .field("previousNames", FieldType::array(FieldType::String))
            .field("numMembers", FieldType::Int)
            .field("user", FieldType::String)
            .field("priority", FieldType::Float)
            .field("locale", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("conversation")
            .field("id", FieldType::String)
            .field("name", FieldType::String)
            .field("nameNormalized", FieldType::String)
            .field("isChannel", FieldType::Bool)
            .field("isGroup", FieldType::Bool)
            .field("isIm", FieldType::Bool)
            .field("isMpim", FieldType::Bool)
            .field("isPrivate", FieldType::Bool)
            .field("isArchived", FieldType::Bool)
            .field("isGeneral", FieldType::Bool)
            .field("isShared", FieldType::Bool)
            .field("isExtShared", FieldType::Bool)
            .field("isOrgShared", FieldType::Bool)
            .field("isPendingExtShared", FieldType::Bool)
            .field("isMember", FieldType::Bool)
            .field("unlinked", FieldType::Int)
            .field("creator", FieldType::String)
            .field("created", FieldType::Int)
            .field("topic", FieldType::record("channelTopic"))
            .field("purpose", FieldType::record("channelPurpose"))
            .field("previousNames", FieldType::array(FieldType::String))
            .field("numMembers", FieldType::Int)
            .field("lastRead", FieldType::String)
            .field("locale", FieldType::String)
            .build(),
    );

    // Users
    reg.register(
        Schema::builder("userProfile")
            .field("avatarHash", FieldType::String)
            .field("statusText", FieldType::String)
            .field("statusEmoji", FieldType::String)
            .field("statusExpiration", FieldType::Int)
            .field("realName", FieldType::String)
            .field("realNameNormalized", FieldType::String)
            .field("displayName", FieldType::String)
            .field("displayNameNormalized", FieldType::String)
            .field("email", FieldType::String)
            .field("firstName", FieldType::String)
            .field("lastName", FieldType::String)
            .field("title", FieldType::String)
            .field("phone", FieldType::String)
            .field("skype", FieldType::String)
            .field("image24", FieldType::String)
            .field("image32", FieldType::String)
            .field("image48", FieldType::String)
            .field("image72", FieldType::String)
            .field("image192", FieldType::String)
            .field("image512", FieldType::String)
            .field("imageOriginal", FieldType::String)
            .field("team", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("user")
            .field("id", FieldType::String)
            .field("teamId", FieldType::String)
            .field("name", FieldType::String)
            .field("realName", FieldType::String)
            .field("deleted", FieldType::Bool)
            .field("color", FieldType::String)
            .field("tz", FieldType::String)
            .field("tzLabel", FieldType::String)
            .field("tzOffset", FieldType::Int)
            .field("profile", FieldType::record("userProfile"))
            .field("isAdmin", FieldType::Bool)
            .field("isOwner", FieldType::Bool)
            .field("isPrimaryOwner", FieldType::Bool)
            .field("isRestricted", FieldType::Bool)
            .field("isUltraRestricted", FieldType::Bool)
            .field("isBot", FieldType::Bool)
            .field("isAppUser", FieldType::Bool)
            .field("has2fa", FieldType::Bool)
            .field("updated", FieldType::Int)
            .build(),
    );

    // RTM events
    reg.register(
        Schema::builder("typingEvent")
            .fixed("type", "typing")
            .field("channel", FieldType::String)
            .field("id", FieldType::Int)
            .build(),
    );
    reg.register(Schema::builder("helloEvent").fixed("type", "hello").build());

    // Response envelopes
    reg.register(
        Schema::builder("responseMetadata")
            .field("nextCursor", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("apiTestResponse")
            .field("ok", FieldType::Bool)
            .field("error", FieldType::String)
            .field("warning", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("authTestResponse")
            .field("ok", FieldType::Bool)
            .field("url", FieldType::String)
            .field("team", FieldType::String)
            .field("user", FieldType::String)
            .field("teamId", FieldType::String)
            .field("userId", FieldType::String)
            .field("botId", FieldType::String)
            .build(),
    );
    reg.register(
        Schema::builder("channelsCreateResponse")
            .field("ok", FieldType::Bool)
            .field("channel", FieldType::record("channel"))
            .build(),
    );
    reg.register(
        Schema::builder("channelsListResponse")
            .field("ok", FieldType::Bool)
            .field("channels", FieldType::array(FieldType::record("channel")))
            .field("responseMetadata", FieldType::record("responseMetadata"))
            .build(),
    );
    reg.register(
        Schema::builder("conversationsInfoResponse")
            .field("ok", FieldType::Bool)
            .field("channel", FieldType::record("conversation"))
            .build(),
    );
    reg.register(
        Schema::builder("chatPostMessageResponse")
            .field("ok", FieldType::Bool)
            .field("channel", FieldType::String)
            .field("ts", FieldType::String)
            .field("message", FieldType::record("message"))
            .build(),
    );
    reg.register(
        Schema::builder("usersListResponse")
            .field("ok", FieldType::Bool)
            .field("members", FieldType::array(FieldType::record("user")))
            .field("cacheTs", FieldType::Int)
            .field("responseMetadata", FieldType::record("responseMetadata"))
            .build(),
    );

    reg.bind_operation("api.test", "apiTestResponse");
    reg.bind_operation("auth.test", "authTestResponse");
    reg.bind_operation("channels.create", "channelsCreateResponse");
    reg.bind_operation("channels.list", "channelsListResponse");
    reg.bind_operation("conversations.info", "conversationsInfoResponse");
    reg.bind_operation("chat.postMessage", "chatPostMessageResponse");
    reg.bind_operation("users.list", "usersListResponse");
    reg.bind_operation("rtm.typing", "typingEvent");

    reg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_resolves_schemas() {
        let reg = registry();
        assert!(reg.schema("message").is_some());
        assert!(reg.schema("userProfile").is_some());
        assert!(reg.schema("flurb").is_none());
    }

    #[test]
    fn test_operation_bindings() {
        let reg = registry();
        let schema = reg.operation_schema("channels.create").unwrap();
        assert_eq!(schema.name(), "channelsCreateResponse");
        assert!(reg.operation_schema("channels.destroy").is_none());
        assert!(reg.operations().count() >= 8);
    }

    #[test]
    fn test_nested_references_are_registered() {
        let reg = registry();
        let message = reg.schema("message").unwrap();
        for field in message.fields() {
            if let FieldType::Record(name) = field.field_type() {
                assert!(reg.schema(name).is_some(), "missing schema `{name}`");
            }
        }
    }

    #[test]
    fn test_wire_names_match_reference_format() {
        let reg = registry();
        let profile = reg.schema("userProfile").unwrap();
        assert_eq!(profile.field("image24").unwrap().wire_name(), "image_24");
        assert_eq!(profile.field("imageOriginal").unwrap().wire_name(), "image_original");

        let user = reg.schema("user").unwrap();
        assert_eq!(user.field("has2fa").unwrap().wire_name(), "has_2fa");

        let list = reg.schema("usersListResponse").unwrap();
        assert_eq!(list.field("cacheTs").unwrap().wire_name(), "cache_ts");
    }
}
