//! Prompt templating and code extraction for generated Manim scripts.
//!
//! [`format_prompt`] wraps the user's request in a fixed instruction block
//! telling the model to produce a single runnable Manim script.
//! [`extract_python_code`] isolates the script body from the model's
//! free-form reply.

/// Fixed instruction preamble sent ahead of every user request.
///
/// Constrains the model to a single runnable script with one `Scene`
/// subclass and a `construct` entry method, and steers it away from
/// fragile MathTex part-indexing APIs.
const SYSTEM_INSTRUCTION: &str = r#"You are an expert in Manim, the mathematical animation library for Python.
Your task is to generate a single, complete, and runnable Python script that produces an animation to explain the concept in the most elegant way possible requested by the user in the user request prompt.

IMPORTANT RULES:
1.  The script must be a single block of code. Do not use explanations outside of the code block.
2.  The script must import all necessary classes from `manim`, like `Scene`, `Create`, `Write`, `Circle`, `Square`, `Text`, `MathTex`, etc.
3.  The script must define a single class that inherits from `manim.Scene`.
4.  The class must contain a `construct(self)` method where the animation logic is defined.
5.  Do not include any code to render the scene (e.g., `manim -pql my_scene.py MyScene`). Only provide the Python script itself.
6.  The code should be well-commented to explain the animation steps.
7.  AVOID using methods like `index_of_part()`, `index_of_part_by_tex()`, or complex MathTex manipulation that may fail.
8.  Keep animations simple and robust - use basic animations like Create(), Write(), FadeIn(), FadeOut(), Transform().
9.  When creating MathTex objects, keep them simple and avoid trying to access individual parts unless absolutely necessary.
10. Test basic functionality first - focus on clear, working animations rather than complex visual effects.

Here is the user's request:"#;

/// Compose the full generation prompt: instruction preamble followed by the
/// verbatim user text.
pub fn format_prompt(user_prompt: &str) -> String {
    format!("{SYSTEM_INSTRUCTION}\n---\nUSER REQUEST: \"{user_prompt}\"\n---")
}

/// Isolate the script body from a model reply.
///
/// If the reply contains a ```` ```python ```` fenced region (or a bare
/// ```` ``` ```` fence), returns its interior trimmed. Otherwise returns the
/// trimmed whole text. No syntactic validation is performed here.
pub fn extract_python_code(response_text: &str) -> String {
    for fence in ["```python", "```"] {
        if let Some(start) = response_text.find(fence) {
            let after = &response_text[start + fence.len()..];
            let interior = match after.find("```") {
                Some(end) => &after[..end],
                None => after,
            };
            return interior.trim().to_string();
        }
    }
    response_text.trim().to_string()
}
