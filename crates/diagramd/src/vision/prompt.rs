//! Instruction text for the image-to-program model call.

/// Compact reference for the renderer's trio languages, embedded in every
/// instruction so the model emits programs the renderer can actually parse.
const TRIO_GRAMMAR: &str = r#"The renderer consumes three programs:

DOMAIN declares the vocabulary:
  type <Name>
  predicate <Name>(<Type> a, <Type> b)
  function <Name>(<Type> a) -> <Type>

SUBSTANCE declares the objects in this diagram using the domain vocabulary:
  <Type> x, y
  <Predicate>(x, y)
  z := <Function>(x)
  AutoLabel All

STYLE maps domain types to visual shapes and layout constraints:
  canvas { width = 800 height = 700 }
  forall <Type> x {
    x.icon = Circle { r = 30 }
    x.text = Equation { string = x.label }
  }
  forall <Type> x; <Type> y where <Predicate>(x, y) {
    ensure contains(x.icon, y.icon)
  }"#;

/// Builds the user instruction for one image-to-program request.
///
/// `guidance` is the optional operator-supplied text loaded at startup; it
/// may be empty.
pub fn build_instruction(guidance: &str) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(
        "You are given an image of a diagram or a rough sketch of one. \
         Reconstruct it as three programs for a constraint-based diagram \
         renderer.\n\n",
    );
    out.push_str(TRIO_GRAMMAR);
    out.push('\n');

    let guidance = guidance.trim();
    if !guidance.is_empty() {
        out.push('\n');
        out.push_str(guidance);
        out.push('\n');
    }

    out.push_str(
        "\nReturn a single JSON object with exactly three string fields: \
         \"domain\", \"substance\", and \"style\". Each field must be a \
         complete, non-empty program. Do not wrap the JSON in code fences, \
         markdown, or any other formatting, and do not add any other fields \
         or commentary.",
    );
    out
}
