use crate::{
    declarations::{
        accessor::join_parts,
        attribute::render_attributes,
        members::{dominant, method::MethodDescriptor, MemberInfo, RenderContext},
        typeinfo::TypeDescriptor,
    },
    metadata::{AttributeTarget, EventDef, TypeSig},
    Result,
};

/// A rendered event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventDescriptor {
    /// Shared member data; accessor and modifiers come from the dominant accessor method
    pub info: MemberInfo,
    /// The delegate type of the event
    pub type_descriptor: TypeDescriptor,
    /// The rendered `add` method
    pub adder: MethodDescriptor,
    /// The rendered `remove` method
    pub remover: MethodDescriptor,
    /// The declaration (`public event EventHandler OnLog`)
    pub declaration: String,
}

impl EventDescriptor {
    /// Render an event
    ///
    /// ## Arguments
    /// * 'event' - The event definition
    /// * 'ctx'   - The render context
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedMember`] for an event missing its add or remove method.
    pub fn render(event: &EventDef, ctx: &RenderContext<'_>) -> Result<Self> {
        let (Some(adder), Some(remover)) = (&event.adder, &event.remover) else {
            return Err(malformed_error!(
                "event '{}' is missing its add or remove method",
                event.name
            ));
        };
        let adder = MethodDescriptor::render(adder, ctx, false)?;
        let remover = MethodDescriptor::render(remover, ctx, false)?;

        let main = dominant(Some(&adder), Some(&remover)).unwrap_or(&adder);
        let mut info = MemberInfo::new(&event.name, main.info.accessor, ctx);
        if !ctx.config.admits(info.accessor) {
            log::trace!("excluding event {}", event.name);
            return Ok(EventDescriptor {
                info: info.exclude(),
                ..EventDescriptor::default()
            });
        }

        info.set_modifiers(main.info.modifiers);
        info.is_static = main.info.is_static;
        info.attributes =
            render_attributes(&ctx.provider.custom_attributes(AttributeTarget::Event(event)));

        let mut descriptor = EventDescriptor {
            info,
            type_descriptor: TypeDescriptor::from_sig(&event.event_type),
            adder,
            remover,
            declaration: String::new(),
        };
        descriptor.finish();
        Ok(descriptor)
    }

    /// Replace the event type and rebuild the declaration
    ///
    /// ## Arguments
    /// * 'sig' - The new delegate type
    pub fn retype(&mut self, sig: &TypeSig) {
        self.type_descriptor = TypeDescriptor::from_sig(sig);
        self.finish();
    }

    /// Recompute the declaration from the descriptor's fields
    pub fn finish(&mut self) {
        let prefix = self.info.prefix();
        self.declaration = join_parts(&[
            prefix.as_str(),
            "event",
            self.type_descriptor.display_name.as_str(),
            self.info.name.as_str(),
        ]);
    }
}
