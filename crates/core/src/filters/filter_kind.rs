/// The closed set of selectable filters, in two families: accessory
/// overlays (bitmap compositing) and deformations (radial warps / tone).
///
/// At most one kind is current at a time. Selecting anything other than
/// `InteractiveWarp` clears interactive warp state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    // Accessory family.
    DogFace,
    Glasses,
    Mustache,
    Hat,
    Santa,
    // Deformation family.
    BigEyes,
    TinyNose,
    WideMouth,
    PuffyCheeks,
    Swirl,
    LongChin,
    MegaFace,
    AlienHead,
    InteractiveWarp,
    // Tone-only deformations: no geometry, whole-frame color work.
    Beauty,
    WarmTint,
}

impl FilterKind {
    pub const ALL: [FilterKind; 16] = [
        FilterKind::DogFace,
        FilterKind::Glasses,
        FilterKind::Mustache,
        FilterKind::Hat,
        FilterKind::Santa,
        FilterKind::BigEyes,
        FilterKind::TinyNose,
        FilterKind::WideMouth,
        FilterKind::PuffyCheeks,
        FilterKind::Swirl,
        FilterKind::LongChin,
        FilterKind::MegaFace,
        FilterKind::AlienHead,
        FilterKind::InteractiveWarp,
        FilterKind::Beauty,
        FilterKind::WarmTint,
    ];

    pub fn is_accessory(self) -> bool {
        matches!(
            self,
            FilterKind::DogFace
                | FilterKind::Glasses
                | FilterKind::Mustache
                | FilterKind::Hat
                | FilterKind::Santa
        )
    }

    pub fn is_deformation(self) -> bool {
        !self.is_accessory()
    }

    /// Tone-only kinds need neither landmarks nor anchors.
    pub fn is_tone_only(self) -> bool {
        matches!(self, FilterKind::Beauty | FilterKind::WarmTint)
    }
}
