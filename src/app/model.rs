use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;

use crate::markdown;
use crate::state::{UiStateHandle, UiStateProvider};
use crate::widgets::{
    ClickableImage, ContentFilter, DisclosureState, FilterOption, GuidedTour, HelpTooltip,
    ImageState, LoadingDots, Placement, ProgressiveDisclosure, SearchBar, SearchState, TourState,
    TourStep, TruncatableState, TruncatableText,
};

pub const KIND_TEXT: &str = "text";
pub const KIND_CODE: &str = "code";
pub const KIND_TABLE: &str = "table";
pub const KIND_IMAGE: &str = "image";

/// One document section: a top-level heading plus everything under it,
/// presented as a disclosure panel around a truncatable body.
pub struct Section {
    pub id: String,
    pub title: String,
    pub kinds: Vec<String>,
    pub disclosure: ProgressiveDisclosure,
    pub disclosure_state: DisclosureState,
    pub text: TruncatableText,
    pub text_state: TruncatableState,
    pub images: Vec<(ClickableImage, ImageState)>,
}

/// Chrome elements that show a tooltip while hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipTarget {
    Filters,
    Search,
    Help,
}

impl TooltipTarget {
    pub fn tooltip(self) -> HelpTooltip {
        match self {
            Self::Filters => HelpTooltip::new(
                "Click a chip to narrow sections to that content kind. Selected chips combine.",
            )
            .placement(Placement::Bottom),
            Self::Search => {
                HelpTooltip::new("Press / and type to filter sections as you go. Esc clears.")
                    .placement(Placement::Bottom)
            }
            Self::Help => {
                HelpTooltip::new("Press F1 or ? for a quick tour of the inspector.")
                    .placement(Placement::Left)
            }
        }
    }
}

/// The topmost overlay, if any. Overlays stack tour > image > text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Tour,
    TextFullscreen(usize),
    ImageFullscreen(usize, usize),
}

/// The complete application state.
pub struct Model {
    /// Path to the inspected file
    pub file_path: PathBuf,
    /// Base directory for resolving relative image paths
    pub base_dir: PathBuf,
    /// Document sections, one per top-level heading
    pub sections: Vec<Section>,
    /// Shared UI-state store (filters, query, tour flag, expanded ids)
    pub store: UiStateProvider,
    /// Content-kind filter chip row
    pub filter: ContentFilter,
    pub tour: GuidedTour,
    pub tour_state: TourState,
    pub search_bar: SearchBar,
    pub search: SearchState,
    /// Status-bar activity indicator
    pub spinner: LoadingDots,
    /// True while a (re)load is in flight
    pub loading: bool,
    /// Last known mtime of the inspected file
    pub modified: Option<SystemTime>,
    /// Index into the visible-section list of the first rendered section
    pub top_section: usize,
    pub hovered: Option<TooltipTarget>,
    /// Image picker for terminal protocols
    pub picker: Option<Picker>,
    /// Decoded image protocols keyed by image src
    pub image_protocols: HashMap<String, StatefulProtocol>,
    pub images_enabled: bool,
    pub should_quit: bool,
    /// Last observed terminal size
    pub frame_size: (u16, u16),
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("sections", &self.sections.len())
            .field("top_section", &self.top_section)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(PathBuf::from("-"), "", (80, 24))
    }
}

impl Model {
    /// Create a model over a document source.
    pub fn new(file_path: PathBuf, source: &str, terminal_size: (u16, u16)) -> Self {
        let base_dir = file_path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let mut model = Self {
            file_path,
            base_dir,
            sections: Vec::new(),
            store: UiStateProvider::new(),
            filter: ContentFilter::default(),
            tour: default_tour(),
            tour_state: TourState::default(),
            search_bar: SearchBar::new("search sections"),
            search: SearchState::default(),
            spinner: LoadingDots::default(),
            loading: false,
            modified: None,
            top_section: 0,
            hovered: None,
            picker: None,
            image_protocols: HashMap::new(),
            images_enabled: true,
            should_quit: false,
            frame_size: terminal_size,
        };
        model.set_source(source);
        model
    }

    /// A consumer handle onto the shared store.
    pub fn ui_handle(&self) -> UiStateHandle {
        self.store.handle()
    }

    /// Rebuild sections from a new document source.
    ///
    /// Sections whose ids were already expanded in the store come back
    /// open, so a reload keeps the reader's place.
    pub fn set_source(&mut self, source: &str) {
        self.sections = split_sections(source)
            .into_iter()
            .map(|src| build_section(&src, &self.store))
            .collect();
        self.filter = build_filter(&self.sections);
        self.top_section = 0;
    }

    /// Indices of sections passing the active filters and search query.
    pub fn visible_sections(&self) -> Vec<usize> {
        let (filters, query) = self
            .store
            .with(|s| (s.active_filters.clone(), s.search_query.clone()));
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, section)| {
                filters
                    .iter()
                    .all(|kind| section.kinds.iter().any(|k| k == kind))
            })
            .filter(|(_, section)| {
                SearchBar::matches(&query, &section.title)
                    || SearchBar::matches(&query, &section.text.serialized())
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Largest valid `top_section` for the current visible list.
    pub fn clamp_top_section(&mut self) {
        let visible = self.visible_sections().len();
        self.top_section = self.top_section.min(visible.saturating_sub(1));
    }

    /// The overlay input should be routed to, topmost first.
    pub fn active_overlay(&self) -> Overlay {
        if self.tour_state.is_open() {
            return Overlay::Tour;
        }
        for (i, section) in self.sections.iter().enumerate() {
            for (j, (_, state)) in section.images.iter().enumerate() {
                if state.is_fullscreen() {
                    return Overlay::ImageFullscreen(i, j);
                }
            }
        }
        for (i, section) in self.sections.iter().enumerate() {
            if section.text_state.is_fullscreen() {
                return Overlay::TextFullscreen(i);
            }
        }
        Overlay::None
    }
}

pub(crate) struct SectionSource {
    pub title: String,
    pub body: String,
}

/// Split a markdown document at top-level headings. Content before the
/// first heading becomes an "Overview" section. Headings inside fenced
/// code blocks do not split.
pub(crate) fn split_sections(source: &str) -> Vec<SectionSource> {
    let mut sections: Vec<SectionSource> = Vec::new();
    let mut title = String::from("Overview");
    let mut body = String::new();
    let mut in_fence = false;

    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        }
        if !in_fence && line.starts_with("# ") {
            if !body.trim().is_empty() || !sections.is_empty() {
                sections.push(SectionSource {
                    title: title.clone(),
                    body: std::mem::take(&mut body),
                });
            } else {
                body.clear();
            }
            title = line[2..].trim().to_string();
        } else {
            body.push_str(line);
            body.push('\n');
        }
    }
    if !body.trim().is_empty() || !sections.is_empty() {
        sections.push(SectionSource { title, body });
    }
    sections
}

/// Stable section id derived from the title.
pub(crate) fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.chars() {
        if c.is_alphanumeric() {
            out.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Content kinds present in a section body.
pub(crate) fn detect_kinds(body: &str) -> Vec<String> {
    let mut kinds = Vec::new();
    let mut in_fence = false;
    let mut has_text = false;
    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            if in_fence && !kinds.iter().any(|k| k == KIND_CODE) {
                kinds.push(KIND_CODE.to_string());
            }
            continue;
        }
        if in_fence {
            continue;
        }
        if trimmed.starts_with('|') {
            if !kinds.iter().any(|k| k == KIND_TABLE) {
                kinds.push(KIND_TABLE.to_string());
            }
        } else if trimmed.contains("![") {
            if !kinds.iter().any(|k| k == KIND_IMAGE) {
                kinds.push(KIND_IMAGE.to_string());
            }
        } else if !trimmed.is_empty() {
            has_text = true;
        }
    }
    if has_text {
        kinds.insert(0, KIND_TEXT.to_string());
    }
    kinds
}

fn build_section(src: &SectionSource, store: &UiStateProvider) -> Section {
    let id = slug(&src.title);
    let open = store.with(|s| s.is_section_expanded(&id));
    let images = markdown::render_markdown(&src.body, 80)
        .images
        .into_iter()
        .map(|img| {
            (
                ClickableImage::new(img.alt, img.src),
                ImageState::default(),
            )
        })
        .collect();
    Section {
        kinds: detect_kinds(&src.body),
        disclosure: ProgressiveDisclosure::new(src.title.clone()),
        disclosure_state: DisclosureState::new(open),
        text: TruncatableText::new(src.body.clone()),
        text_state: TruncatableState::default(),
        images,
        id,
        title: src.title.clone(),
    }
}

fn build_filter(sections: &[Section]) -> ContentFilter {
    let counts = |kind: &str| {
        sections
            .iter()
            .filter(|s| s.kinds.iter().any(|k| k == kind))
            .count()
    };
    ContentFilter::new(
        [
            (KIND_TEXT, "Text"),
            (KIND_CODE, "Code"),
            (KIND_TABLE, "Tables"),
            (KIND_IMAGE, "Images"),
        ]
        .into_iter()
        .map(|(value, label)| FilterOption::new(value, label).count(counts(value)))
        .collect(),
    )
}

fn default_tour() -> GuidedTour {
    GuidedTour::new(vec![
        TourStep::new(
            "Welcome",
            "docent splits the document into sections, one per top-level \
             heading. Click a header or press Enter to open one.",
        ),
        TourStep::new(
            "Filters",
            "The chip row narrows sections by content kind. Selected chips \
             combine, so *Code* plus *Tables* shows sections with both.",
        ),
        TourStep::new(
            "Search",
            "Press `/` and type to filter sections live. The query matches \
             titles and body text.",
        ),
        TourStep::new(
            "Reading more",
            "Long sections are cut short. *more* expands them inline; \
             *full* opens a fullscreen view. Click an image to enlarge it.",
        ),
    ])
}
