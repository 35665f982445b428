//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# arview configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[appearance]
# background = "#181616"
# page_gap = 16           # 0-100
# page_radius = 8         # 0-50
# width_percent = 0.95    # 0.1-1.0 (overlay width)
# overlay_height = 500    # 200-2000 (quick list, workspace switcher)

[appearance.margins]
# top = 16
# right = 0
# bottom = 8
# left = 0

[appearance.colors]
# accent = "#8ab4ff"
# muted = "#3a3939"
# button_hover = "#98bb6c"
# text = "#e6e1dc"
# muted_text = "#9e9a96"

[pdf_viewer]
# default_fit = "auto"    # auto, width, height
# pan_speed = 3.5
# pan_speed_modifier = 2.5
# pan_smoothing = 0.15    # 0.0-1.0
# min_zoom = 0.1
# max_zoom = 6.0
# zoom_intensity = 0.018
# max_key_hold_time_ms = 3000

[keyboard.global]
# command_palette = "CommandOrControl+P"
# quick_list = "CommandOrControl+/"
# workspace_switcher = "CommandOrControl+Shift+/"
# add_to_quick_list = "CommandOrControl+U"
# reload = "CommandOrControl+R"

[keyboard.tabs]
# new_tab = "CommandOrControl+T"
# close_tab = "CommandOrControl+W"
# reopen_tab = "CommandOrControl+Shift+T"
# navigate_back = "CommandOrControl+Left"
# navigate_forward = "CommandOrControl+Right"
# toggle_tab_bar = "CommandOrControl+Comma"
# switch_to_tab = true    # CommandOrControl+1..9

[keyboard.pdf_navigation]
# pan_left = ["h", "ArrowLeft"]
# pan_right = ["l", "ArrowRight"]
# pan_up = ["k", "ArrowUp"]
# pan_down = ["j", "ArrowDown"]
# jump_top = "g"
# jump_bottom = "G"

[tabs]
# show = false
# height = 32             # 16-128
# active_tab_text = "#ffffff"
# inactive_tab_text = "#9e9a96"
# separator_color = "#8d9a7e"

[file_watching]
# stability_threshold_ms = 300   # 100-5000
# poll_interval_ms = 100         # 50-1000

[session]
# max_closed_tabs = 30    # 1-100
# auto_save = true

[command_palette]
# width = 600             # 200-1200
# height = 60             # 40-200
# top_offset = 120        # 0-500
# default_search_engine = "https://www.google.com/search?q=%s"

[command_palette.quick_actions]
# switch_to_web = "s"
# switch_to_pdf = "p"
# go_back = "b"
# go_forward = "f"

[logging]
# level = "info"          # trace, debug, info, warn, error
# file_logging = false
"##
}
