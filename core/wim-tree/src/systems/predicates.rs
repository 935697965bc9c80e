use wim_protocol::{Lexicon, NounClass, PhraseKind, Predicate};

use crate::{NodeId, PhraseTree};

/// Part-of-speech tags that mark a head noun as a person.
const PERSON_TAGS: [&str; 4] = ["NNP", "NNPS", "PRP", "PRO"];

impl PhraseTree {
    /// Evaluates a functional-tag predicate on `node` relative to `vp`.
    ///
    /// `None` means the phrase kind does not expose the predicate at all,
    /// which callers treat as a failed match.
    pub fn satisfies(
        &self,
        node: NodeId,
        predicate: &Predicate,
        vp: NodeId,
        lexicon: &dyn Lexicon,
    ) -> Option<bool> {
        let kind = self.kind(node)?;

        match (predicate, kind) {
            (Predicate::Head, _) => Some(true),
            (Predicate::Token(text), _) => Some(self.is_token(node, text)),
            (Predicate::Something, PhraseKind::Noun) => Some(self.is_thing(node)),
            (Predicate::Somebody, PhraseKind::Noun) => Some(self.is_person(node, lexicon)),
            (Predicate::Possessive, PhraseKind::Noun) => Some(self.is_possessive(node)),
            (Predicate::BodyPart, PhraseKind::Noun) => Some(self.is_body_part(node, lexicon)),
            (Predicate::Subject, PhraseKind::Noun) => {
                Some(self.subject(vp).ok().flatten() == Some(node))
            }
            (
                Predicate::DirectObject,
                PhraseKind::Noun | PhraseKind::Adjective | PhraseKind::Verb,
            ) => Some(self.direct_object(vp).ok().flatten() == Some(node)),
            (Predicate::IndirectObject, PhraseKind::Noun | PhraseKind::Verb) => {
                Some(self.indirect_object(vp).ok().flatten() == Some(node))
            }
            (Predicate::Infinitive, PhraseKind::Verb) => Some(self.is_infinitive(node)),
            (Predicate::Gerund, PhraseKind::Verb) => Some(self.is_gerund(node)),
            _ => None,
        }
    }

    /// Case-insensitive text test. Phrases with a head also accept a match
    /// on the head's words.
    pub fn is_token(&self, node: NodeId, text: &str) -> bool {
        let wanted = text.trim().trim_matches('"').to_lowercase();
        if self.text(node).to_lowercase() == wanted {
            return true;
        }

        match self.kind(node) {
            Some(PhraseKind::Token) | Some(PhraseKind::Base) | None => false,
            Some(_) => self
                .head(node)
                .ok()
                .and_then(|head| head.first())
                .map(|head| self.is_token(head, text))
                .unwrap_or(false),
        }
    }

    pub fn is_thing(&self, _np: NodeId) -> bool {
        true
    }

    /// Proper nouns and pronouns are people; otherwise ask the lexicon
    /// whether the head noun is an animal.
    pub fn is_person(&self, np: NodeId, lexicon: &dyn Lexicon) -> bool {
        let head = match self.head(np).ok().and_then(|head| head.first()) {
            Some(head) => head,
            None => return false,
        };

        if PERSON_TAGS
            .iter()
            .any(|tag| self.find_first_child(head, tag).is_some())
        {
            return true;
        }
        lexicon.noun_is(&self.text(head), NounClass::Animal)
    }

    pub fn is_possessive(&self, np: NodeId) -> bool {
        !self.find_all(np, "POS").is_empty()
    }

    pub fn is_body_part(&self, np: NodeId, lexicon: &dyn Lexicon) -> bool {
        match self.head(np).ok().and_then(|head| head.first()) {
            Some(head) => lexicon.noun_is(&self.text(head), NounClass::BodyPart),
            None => false,
        }
    }

    pub fn is_infinitive(&self, vp: NodeId) -> bool {
        self.head_has_tag(vp, "VB")
    }

    pub fn is_gerund(&self, vp: NodeId) -> bool {
        self.head_has_tag(vp, "VBG")
    }

    fn head_has_tag(&self, vp: NodeId, tag: &str) -> bool {
        self.head(vp)
            .ok()
            .and_then(|head| head.first())
            .map(|head| !self.find_all(head, tag).is_empty())
            .unwrap_or(false)
    }
}
