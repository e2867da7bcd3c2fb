//! Interprets a markup string against a context and a render backend.

use markup::{ActionTag, Control, Element, Format, ParseError, Tag, TokenStream};

use crate::action::{ActionId, ActionTracker};
use crate::context::{Alignment, Context};
use crate::error::{DispatchError, InvariantViolation};
use crate::renderer::Renderer;
use crate::settings::BarSettings;
use crate::signal::{Signal, SignalEmitter};

/// Outcome of one successful dispatch pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Malformed tag blocks that were skipped.
    pub parse_errors: usize,
    /// Action close tags without a matching open region.
    pub unmatched_closes: usize,
    /// Regions still open when the input ran out.
    pub unclosed: Vec<ActionId>,
}

impl CycleSummary {
    pub fn is_clean(&self) -> bool {
        self.parse_errors == 0 && self.unmatched_closes == 0 && self.unclosed.is_empty()
    }
}

/// Drives one bar's markup through a [`Renderer`].
///
/// Owns the bar's [`ActionTracker`], which survives between passes so that
/// clicks can be resolved against the regions of the last redraw.
///
/// # Examples
///
/// ```
/// use render::{BarSettings, Dispatch, testing::Recorder};
///
/// let recorder = Recorder::new();
/// let mut dispatch = Dispatch::new(recorder.emitter());
/// let summary = dispatch
///     .parse(&BarSettings::default(), &mut recorder.renderer(), "%{A1:reboot:}off%{A}")
///     .unwrap();
/// assert!(summary.is_clean());
/// assert_eq!(dispatch.actions().num_actions(), 1);
/// ```
#[derive(Debug)]
pub struct Dispatch<E> {
    emitter: E,
    actions: ActionTracker,
}

impl<E: SignalEmitter> Dispatch<E> {
    pub fn new(emitter: E) -> Self {
        Self::with_tracker(emitter, ActionTracker::new())
    }

    pub fn with_tracker(emitter: E, actions: ActionTracker) -> Self {
        Self { emitter, actions }
    }

    pub fn actions(&self) -> &ActionTracker {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionTracker {
        &mut self.actions
    }

    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    /// Process one markup string.
    ///
    /// Malformed tags and unmatched action closes are logged and skipped.
    /// Returns an error only for a fatal [`InvariantViolation`], in which case
    /// the remainder of `data` is not processed.
    pub fn parse(
        &mut self,
        bar: &BarSettings,
        renderer: &mut dyn Renderer,
        data: &str,
    ) -> Result<CycleSummary, DispatchError> {
        self.actions.begin_cycle();
        let mut ctx = Context::new(bar);
        let mut summary = CycleSummary::default();

        let mut stream = TokenStream::new(data);
        while let Some(item) = stream.next_element() {
            match self.handle_element(&mut ctx, renderer, item) {
                Ok(()) => {}
                Err(DispatchError::Parse(reason)) => {
                    log::error!("Parser error (reason: {reason})");
                    summary.parse_errors += 1;
                }
                Err(err @ DispatchError::UnmatchedClose { .. }) => {
                    log::warn!("{err}");
                    summary.unmatched_closes += 1;
                }
                Err(err) => {
                    log::error!("Aborting dispatch: {err}");
                    return Err(err);
                }
            }
        }

        // Left in the tracker until the next pass discards them.
        summary.unclosed = self.actions.end_cycle();
        if !summary.unclosed.is_empty() {
            log::warn!("{} unclosed action block(s)", summary.unclosed.len());
        }

        Ok(summary)
    }

    fn handle_element(
        &mut self,
        ctx: &mut Context<'_>,
        renderer: &mut dyn Renderer,
        item: Result<Element, ParseError>,
    ) -> Result<(), DispatchError> {
        match item? {
            Element::Text(text) => renderer.render_text(ctx, &text),
            Element::Tag(Tag::Format(format)) => self.handle_format(ctx, renderer, format)?,
            Element::Tag(Tag::Attr {
                activation,
                attribute,
            }) => ctx.apply_attr(activation, attribute),
        }
        Ok(())
    }

    fn handle_format(
        &mut self,
        ctx: &mut Context<'_>,
        renderer: &mut dyn Renderer,
        format: Format,
    ) -> Result<(), DispatchError> {
        log::trace!("format tag {format:?}");
        match format {
            Format::Action(action) => self.handle_action(ctx, renderer, action)?,
            Format::Background(color) => ctx.apply_bg(color),
            Format::Foreground(color) => ctx.apply_fg(color),
            Format::Font(font) => ctx.apply_font(font),
            Format::Offset(offset) => renderer.render_offset(ctx, offset),
            Format::Reverse => ctx.apply_reverse(),
            Format::Overline(color) => ctx.apply_ol(color),
            Format::Underline(color) => ctx.apply_ul(color),
            Format::Control(control) => Self::handle_control(ctx, control)?,
            Format::AlignLeft => self.handle_alignment(ctx, Alignment::Left),
            Format::AlignRight => self.handle_alignment(ctx, Alignment::Right),
            Format::AlignCenter => self.handle_alignment(ctx, Alignment::Center),
            other => return Err(InvariantViolation::UnknownFormat(other.tag_char()).into()),
        }
        Ok(())
    }

    /// The context and the bar's view of the current zone must change together.
    fn handle_alignment(&mut self, ctx: &mut Context<'_>, alignment: Alignment) {
        ctx.apply_alignment(alignment);
        self.emitter.emit(Signal::ChangeAlignment(alignment));
    }

    fn handle_action(
        &mut self,
        ctx: &Context<'_>,
        renderer: &mut dyn Renderer,
        action: ActionTag,
    ) -> Result<(), DispatchError> {
        let zone = ctx.alignment();
        match action {
            ActionTag::Open { button, command } => {
                log::debug!("open action {command:?} for button {}", button.number());
                let id = self.actions.action_open(button, command, zone);
                renderer.action_open(ctx, button, id);
            }
            ActionTag::Close { button } => {
                let (id, _) = self
                    .actions
                    .action_close(button, zone)
                    .ok_or(DispatchError::UnmatchedClose { button, zone })?;
                renderer.action_close(ctx, id);
            }
        }
        Ok(())
    }

    fn handle_control(ctx: &mut Context<'_>, control: Control) -> Result<(), DispatchError> {
        match control {
            Control::Reset => ctx.apply_reset(),
            other => return Err(InvariantViolation::UnknownControl(format!("{other:?}")).into()),
        }
        Ok(())
    }
}
