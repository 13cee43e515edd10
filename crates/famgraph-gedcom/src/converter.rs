//! Record-to-entity conversion.
//!
//! Runs two passes over the built records. The first indexes `NOTE`, `SOUR`
//! and `OBJE` records so pointers to them resolve wherever they appear in the
//! file; the second converts the header, individuals and families. Nothing in
//! here fails: unknown tags, dangling pointers and duplicate ids are counted
//! and logged, and conversion carries on.

use crate::config::ParserConfig;
use crate::date::parse_date;
use crate::name::{is_name_part, parse_name};
use crate::record::{RawNode, RawValue};
use famgraph::{
    Event, EventKind, Family, FamilyData, Header, Media, MediaRef, NoteRecord, OpaqueField,
    Person, PersonName, Sex, Source, SourceCitation,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Counters for one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Level-0 records seen
    pub records: usize,
    /// Individuals converted
    pub people: usize,
    /// Families converted
    pub families: usize,
    /// Source records
    pub sources: usize,
    /// Media records
    pub media: usize,
    /// Note records
    pub notes: usize,
    /// Events created on people and families
    pub events: usize,
    /// Level-0 records of a type not converted
    pub other_records: usize,
    /// Records dropped because their id was already taken
    pub duplicate_ids: usize,
    /// `NOTE`/`SOUR`/`OBJE` pointers that named no record
    pub unresolved_references: usize,
    /// Tags with no meaning for their entity
    pub unknown_tags: usize,
}

/// Convert built records into entity collections.
///
/// Graph edges are left empty; [`famgraph::link_families`] fills them in.
pub fn convert(records: &[RawNode], config: &ParserConfig) -> (FamilyData, ConversionStats) {
    let mut converter = Converter::new(config);
    converter.index(records);
    converter.convert_records(records);
    converter.finish()
}

struct Converter<'a> {
    config: &'a ParserConfig,
    data: FamilyData,
    stats: ConversionStats,
    // (record tag, id) pairs already claimed
    seen: HashSet<(String, String)>,
    notes: HashMap<String, String>,
    source_index: HashMap<String, usize>,
    media_index: HashMap<String, usize>,
    header_seen: bool,
}

impl<'a> Converter<'a> {
    fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            data: FamilyData::default(),
            stats: ConversionStats::default(),
            seen: HashSet::new(),
            notes: HashMap::new(),
            source_index: HashMap::new(),
            media_index: HashMap::new(),
            header_seen: false,
        }
    }

    /// First pass: shared notes, then sources and media (which may cite notes).
    fn index(&mut self, records: &[RawNode]) {
        for record in records.iter().filter(|r| is_note_tag(&r.tag) && r.xref.is_some()) {
            let Some(id) = self.claim(record) else {
                continue;
            };
            let text = record
                .text_value()
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            self.notes.insert(id.clone(), text.clone());
            self.data.notes.push(NoteRecord { id, text });
        }

        for record in records.iter().filter(|r| r.xref.is_some()) {
            match record.tag.as_str() {
                "SOUR" => {
                    if let Some(id) = self.claim(record) {
                        let source = self.convert_source(record, id);
                        self.source_index
                            .insert(source.id.clone(), self.data.sources.len());
                        self.data.sources.push(source);
                    }
                }
                "OBJE" => {
                    if let Some(id) = self.claim(record) {
                        let media = self.convert_media(record, id);
                        self.media_index
                            .insert(media.id.clone(), self.data.media.len());
                        self.data.media.push(media);
                    }
                }
                _ => {}
            }
        }
    }

    /// Second pass: everything that may point at the indexed records.
    fn convert_records(&mut self, records: &[RawNode]) {
        for record in records {
            self.stats.records += 1;
            match record.tag.as_str() {
                "HEAD" => self.convert_header(record),
                "INDI" => {
                    if let Some(id) = self.claim(record) {
                        let person = self.convert_person(record, id);
                        self.data.people.push(person);
                    }
                }
                "FAM" => {
                    if let Some(id) = self.claim(record) {
                        let family = self.convert_family(record, id);
                        self.data.families.push(family);
                    }
                }
                "SOUR" | "OBJE" | "NOTE" | "SNOTE" if record.xref.is_some() => {}
                "TRLR" => {}
                other => {
                    debug!("Keeping {other} record on line {} as opaque", record.line);
                    self.stats.other_records += 1;
                    if self.config.keep_unknown_tags {
                        self.data.other_records.push(record.to_opaque());
                    }
                }
            }
        }
    }

    fn finish(mut self) -> (FamilyData, ConversionStats) {
        self.stats.people = self.data.people.len();
        self.stats.families = self.data.families.len();
        self.stats.sources = self.data.sources.len();
        self.stats.media = self.data.media.len();
        self.stats.notes = self.data.notes.len();
        debug!(
            "Converted {} records: {} people, {} families, {} unresolved references",
            self.stats.records,
            self.stats.people,
            self.stats.families,
            self.stats.unresolved_references
        );
        (self.data, self.stats)
    }

    /// Take ownership of a record id; `None` if absent or already taken.
    fn claim(&mut self, record: &RawNode) -> Option<String> {
        let Some(id) = record.xref.clone() else {
            debug!(
                "Skipping {} record on line {} without an id",
                record.tag, record.line
            );
            return None;
        };
        if !self.seen.insert((record.tag.clone(), id.clone())) {
            warn!(
                "Duplicate {} record @{id}@ on line {}, keeping the first",
                record.tag, record.line
            );
            self.stats.duplicate_ids += 1;
            return None;
        }
        Some(id)
    }

    fn convert_header(&mut self, record: &RawNode) {
        if self.header_seen {
            warn!("Ignoring second HEAD record on line {}", record.line);
            return;
        }
        self.header_seen = true;

        let mut header = Header::default();
        collect_fields(&record.children, "", &mut header.fields);
        header.version = header.field("GEDC.VERS").map(str::to_string);
        header.charset = header.field("CHAR").map(str::to_string);
        header.language = header.field("LANG").map(str::to_string);
        header.source_system = header.field("SOUR").map(str::to_string);
        header.filename = header.field("FILE").map(str::to_string);
        self.data.header = header;
    }

    fn convert_person(&mut self, record: &RawNode, id: String) -> Person {
        let mut person = Person::new(id, PersonName::default(), Sex::Unknown);
        let mut named = false;

        for child in &record.children {
            match child.tag.as_str() {
                "NAME" => {
                    let name = self.convert_name(child);
                    if named {
                        person.alternate_names.push(name);
                    } else {
                        person.name = name;
                        named = true;
                    }
                }
                "SEX" => person.sex = parse_sex(child.text_value()),
                "OCCU" => person.occupations.extend(non_blank(child.text_value())),
                "EDUC" => person.education.extend(non_blank(child.text_value())),
                "RELI" => person.religion.extend(non_blank(child.text_value())),
                "NOTE" | "SNOTE" => person.notes.extend(self.note_text(child)),
                "SOUR" => person.sources.extend(self.citation(child)),
                "OBJE" => person.media.extend(self.media_ref(child)),
                "FAMC" => push_pointer(&mut person.child_of_families, child),
                "FAMS" => push_pointer(&mut person.spouse_of_families, child),
                "REFN" => person.user_references.extend(non_blank(child.text_value())),
                "RIN" => person.record_id = non_blank(child.text_value()),
                "AFN" => person.ancestral_file_number = non_blank(child.text_value()),
                "CHAN" => person.last_changed = child.text_owned("DATE"),
                tag => match individual_event_kind(tag) {
                    Some(kind) => person.events.extend(self.convert_event(child, kind)),
                    None => self.unknown_tag(child, &mut person.unknown),
                },
            }
        }

        person
    }

    fn convert_family(&mut self, record: &RawNode, id: String) -> Family {
        let mut family = Family::new(id);

        for child in &record.children {
            match child.tag.as_str() {
                "HUSB" => set_pointer(&mut family.husband, child),
                "WIFE" => set_pointer(&mut family.wife, child),
                "CHIL" => push_pointer(&mut family.children, child),
                "MARR" => {
                    if let Some(event) = self.convert_event(child, EventKind::Marriage) {
                        if family.marriage.is_none() {
                            family.marriage = Some(event);
                        } else {
                            family.events.push(event);
                        }
                    }
                }
                "DIV" => {
                    if let Some(event) = self.convert_event(child, EventKind::Divorce) {
                        if family.divorce.is_none() {
                            family.divorce = Some(event);
                        } else {
                            family.events.push(event);
                        }
                    }
                }
                "NOTE" | "SNOTE" => family.notes.extend(self.note_text(child)),
                "SOUR" => family.sources.extend(self.citation(child)),
                "OBJE" => family.media.extend(self.media_ref(child)),
                tag => match family_event_kind(tag) {
                    Some(kind) => family.events.extend(self.convert_event(child, kind)),
                    None => self.unknown_tag(child, &mut family.unknown),
                },
            }
        }

        family
    }

    fn convert_name(&mut self, node: &RawNode) -> PersonName {
        let mut name = parse_name(node);
        self.unknown_children(node, is_name_part, &mut name.unknown);
        name
    }

    fn convert_source(&mut self, record: &RawNode, id: String) -> Source {
        let mut source = Source {
            id,
            title: record.text_owned("TITL"),
            author: record.text_owned("AUTH"),
            publication: record.text_owned("PUBL"),
            text: record.text_owned("TEXT"),
            abbreviation: record.text_owned("ABBR"),
            notes: self.notes_of(record),
            unknown: Vec::new(),
        };
        self.unknown_children(
            record,
            |tag| matches!(tag, "TITL" | "AUTH" | "PUBL" | "TEXT" | "ABBR") || is_note_tag(tag),
            &mut source.unknown,
        );
        source
    }

    fn convert_media(&mut self, record: &RawNode, id: String) -> Media {
        let fields = MediaFields::read(record);
        let mut media = Media {
            id,
            title: fields.title,
            file: fields.file,
            format: fields.format,
            media_type: fields.media_type,
            notes: self.notes_of(record),
            unknown: Vec::new(),
        };
        self.unknown_children(
            record,
            |tag| matches!(tag, "FILE" | "FORM" | "TITL") || is_note_tag(tag),
            &mut media.unknown,
        );
        media
    }

    /// An event exists only when the source gives it a date or a place.
    fn convert_event(&mut self, node: &RawNode, kind: EventKind) -> Option<Event> {
        let date = node.text("DATE").map(parse_date);
        let place = node.text_owned("PLAC");
        if date.is_none() && place.is_none() {
            debug!(
                "No date or place for {} on line {}, skipping event",
                node.tag, node.line
            );
            return None;
        }

        let description = node
            .text_owned("TYPE")
            .or_else(|| non_blank(node.text_value()).filter(|v| v != "Y"));
        let kind = match kind {
            EventKind::Other(_) => EventKind::Other(
                description.clone().unwrap_or_else(|| "Event".to_string()),
            ),
            kind => kind,
        };

        let mut event = Event::new(kind);
        event.date = date;
        event.place = place;
        event.address = node.text_owned("ADDR");
        event.cause = node.text_owned("CAUS");
        event.age = node.text_owned("AGE");
        event.description = description;
        event.notes = self.notes_of(node);
        event.sources = node
            .all("SOUR")
            .filter_map(|citation| self.citation(citation))
            .collect();
        self.unknown_children(node, is_event_detail, &mut event.unknown);

        self.stats.events += 1;
        Some(event)
    }

    fn notes_of(&mut self, node: &RawNode) -> Vec<String> {
        node.children
            .iter()
            .filter(|child| is_note_tag(&child.tag))
            .filter_map(|child| self.note_text(child))
            .collect()
    }

    /// Inline note text, or the text of the note record it points to.
    fn note_text(&mut self, node: &RawNode) -> Option<String> {
        match &node.value {
            Some(RawValue::Text(text)) => non_blank(Some(text.as_str())),
            Some(RawValue::Pointer(id)) => {
                if !self.config.resolve_references {
                    return Some(format!("@{id}@"));
                }
                if let Some(text) = self.notes.get(id) {
                    return Some(text.clone());
                }
                self.unresolved(node, id);
                None
            }
            None => None,
        }
    }

    fn citation(&mut self, node: &RawNode) -> Option<SourceCitation> {
        let page = node.text_owned("PAGE");
        match &node.value {
            Some(RawValue::Pointer(id)) => {
                let title = if self.config.resolve_references {
                    match self.source_index.get(id) {
                        Some(&index) => self.data.sources[index].title.clone(),
                        None => {
                            self.unresolved(node, id);
                            return None;
                        }
                    }
                } else {
                    None
                };
                Some(SourceCitation {
                    source_id: Some(id.clone()),
                    title,
                    page,
                })
            }
            Some(RawValue::Text(text)) => Some(SourceCitation {
                source_id: None,
                title: non_blank(Some(text.as_str())),
                page,
            }),
            None => page.map(|page| SourceCitation {
                page: Some(page),
                ..Default::default()
            }),
        }
    }

    fn media_ref(&mut self, node: &RawNode) -> Option<MediaRef> {
        if let Some(id) = node.pointer() {
            if !self.config.resolve_references {
                return Some(MediaRef {
                    media_id: Some(id.to_string()),
                    ..Default::default()
                });
            }
            return match self.media_index.get(id) {
                Some(&index) => Some(MediaRef::from(&self.data.media[index])),
                None => {
                    self.unresolved(node, id);
                    None
                }
            };
        }

        let fields = MediaFields::read(node);
        if fields.file.is_none() && fields.title.is_none() {
            return None;
        }
        Some(MediaRef {
            media_id: None,
            file: fields.file,
            format: fields.format,
            title: fields.title,
        })
    }

    fn unresolved(&mut self, node: &RawNode, id: &str) {
        debug!(
            "Unresolved {} reference @{id}@ on line {}",
            node.tag, node.line
        );
        self.stats.unresolved_references += 1;
    }

    fn unknown_tag(&mut self, node: &RawNode, sink: &mut Vec<OpaqueField>) {
        self.stats.unknown_tags += 1;
        if self.config.keep_unknown_tags {
            sink.push(node.to_opaque());
        }
    }

    /// Keep every child of `node` whose tag `known` rejects.
    fn unknown_children(
        &mut self,
        node: &RawNode,
        known: impl Fn(&str) -> bool,
        sink: &mut Vec<OpaqueField>,
    ) {
        for child in node.children.iter().filter(|child| !known(&child.tag)) {
            self.unknown_tag(child, sink);
        }
    }
}

/// File, format, title and type of an `OBJE` structure.
///
/// GEDCOM 5.5 puts `FORM` and `TITL` beside `FILE`; 5.5.1 and 7.0 nest them
/// under it. Both layouts are read.
struct MediaFields {
    file: Option<String>,
    format: Option<String>,
    title: Option<String>,
    media_type: Option<String>,
}

impl MediaFields {
    fn read(node: &RawNode) -> Self {
        let file_node = node.first("FILE");
        let form_node = file_node
            .and_then(|file| file.first("FORM"))
            .or_else(|| node.first("FORM"));

        Self {
            file: node.text_owned("FILE"),
            format: form_node.and_then(|form| non_blank(form.text_value())),
            title: node
                .text_owned("TITL")
                .or_else(|| file_node.and_then(|file| file.text_owned("TITL"))),
            media_type: form_node.and_then(|form| {
                form.text_owned("TYPE").or_else(|| form.text_owned("MEDI"))
            }),
        }
    }
}

fn individual_event_kind(tag: &str) -> Option<EventKind> {
    Some(match tag {
        "BIRT" => EventKind::Birth,
        "DEAT" => EventKind::Death,
        "BAPM" => EventKind::Baptism,
        "CHR" => EventKind::Christening,
        "BURI" => EventKind::Burial,
        "CREM" => EventKind::Cremation,
        "CONF" => EventKind::Confirmation,
        "FCOM" => EventKind::FirstCommunion,
        "BARM" => EventKind::BarMitzvah,
        "BASM" => EventKind::BasMitzvah,
        "BLES" => EventKind::Blessing,
        "ORDN" => EventKind::Ordination,
        "GRAD" => EventKind::Graduation,
        "RETI" => EventKind::Retirement,
        "EMIG" => EventKind::Emigration,
        "IMMI" => EventKind::Immigration,
        "NATU" => EventKind::Naturalization,
        "RESI" => EventKind::Residence,
        "ADOP" => EventKind::Adoption,
        "CENS" => EventKind::Census,
        "PROB" => EventKind::Probate,
        "WILL" => EventKind::Will,
        "EVEN" => EventKind::Other(String::new()),
        _ => return None,
    })
}

fn family_event_kind(tag: &str) -> Option<EventKind> {
    Some(match tag {
        "ENGA" => EventKind::Engagement,
        "MARB" => EventKind::MarriageBanns,
        "MARC" => EventKind::MarriageContract,
        "MARL" => EventKind::MarriageLicense,
        "MARS" => EventKind::MarriageSettlement,
        "ANUL" => EventKind::Annulment,
        "DIVF" => EventKind::DivorceFiled,
        "CENS" => EventKind::Census,
        "RESI" => EventKind::Residence,
        "EVEN" => EventKind::Other(String::new()),
        _ => return None,
    })
}

fn parse_sex(value: Option<&str>) -> Sex {
    match value.map(|v| v.trim().to_ascii_uppercase()).as_deref() {
        Some("M") => Sex::Male,
        Some("F") => Sex::Female,
        _ => Sex::Unknown,
    }
}

/// Event substructures read by `convert_event`.
fn is_event_detail(tag: &str) -> bool {
    matches!(
        tag,
        "DATE" | "PLAC" | "ADDR" | "CAUS" | "AGE" | "TYPE" | "SOUR"
    ) || is_note_tag(tag)
}

fn is_note_tag(tag: &str) -> bool {
    tag == "NOTE" || tag == "SNOTE"
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn set_pointer(slot: &mut Option<String>, node: &RawNode) {
    match node.pointer() {
        Some(id) if slot.is_none() => *slot = Some(id.to_string()),
        Some(id) => debug!(
            "Ignoring extra {} @{id}@ on line {}",
            node.tag, node.line
        ),
        None => debug!("{} on line {} is not a pointer", node.tag, node.line),
    }
}

fn push_pointer(ids: &mut Vec<String>, node: &RawNode) {
    match node.pointer() {
        Some(id) if !ids.iter().any(|existing| existing == id) => ids.push(id.to_string()),
        Some(_) => {}
        None => debug!("{} on line {} is not a pointer", node.tag, node.line),
    }
}

fn collect_fields(nodes: &[RawNode], prefix: &str, fields: &mut BTreeMap<String, Vec<String>>) {
    for node in nodes {
        let path = if prefix.is_empty() {
            node.tag.clone()
        } else {
            format!("{prefix}.{}", node.tag)
        };
        if let Some(value) = &node.value {
            fields.entry(path.clone()).or_default().push(value.to_text());
        }
        collect_fields(&node.children, &path, fields);
    }
}
