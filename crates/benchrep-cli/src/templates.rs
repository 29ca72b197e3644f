//! Embedded plot templates. `%NAME%` placeholders are filled by the tex
//! commands; optional ones sit at the start of a line so an unreplaced
//! placeholder reads as a TeX comment.

pub const PLOT_QUERY_DATA_TEX: &str = r#"\documentclass{standalone}
\usepackage[usenames,svgnames]{xcolor}
\usepackage{pgfplots}
\usepgfplotslibrary{colorbrewer}
\pgfplotsset{compat=1.16}

\begin{document}
\begin{tikzpicture}
\begin{axis}[
width=%WIDTH%pt,
height=160pt,
ybar=0pt,
bar width=2.25pt,
ymin=0,
%Y_MAX%
enlarge x limits={abs=%X_LIMITS%pt},
symbolic x coords={%QUERIES%},
xtick=data,
x tick label style={font=\tiny},
y tick label style={font=\tiny},
ylabel={Duration (s)},
ylabel style={font=\small},
cycle list/%COLOR_SCHEME%,
every axis plot/.append style={fill,draw=none,no markers},
error bars/y dir=both,
error bars/y explicit,
error bars/error mark options={gray,mark size=1pt,line width=0.2pt},
error bars/error bar style={gray,line width=0.2pt},
legend style={at={(%LEGEND_POS%)},anchor=north east,font=\tiny},
legend cell align={left},
]
%BARS%
\legend{%LEGEND%}
\end{axis}
\end{tikzpicture}
\end{document}
"#;

pub const PLOT_QUERY_TIMES_TEX: &str = r#"\documentclass{standalone}
\usepackage[usenames,svgnames]{xcolor}
\usepackage{pgfplots}
\usepgfplotslibrary{colorbrewer}
\pgfplotsset{compat=1.16}

\begin{document}
\begin{tikzpicture}
\begin{axis}[
width=260pt,
height=180pt,
ymin=0,
%Y_MAX%
xlabel={Time (ms)},
ylabel={Results arrived},
label style={font=\small},
tick label style={font=\tiny},
cycle list/%COLOR_SCHEME%,
legend style={at={(%LEGEND_POS%)},anchor=north east,font=\tiny},
legend cell align={left},
]
%LINES%
\legend{%LEGEND%}
\end{axis}
\end{tikzpicture}
\end{document}
"#;
